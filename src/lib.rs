#![forbid(unsafe_code)]
//! Horaire — codec de planning hebdomadaire récurrent.
//!
//! - Grille 7×24 (UI) <-> liste minimale de créneaux (stockage).
//! - Semaine circulaire : un créneau dimanche soir -> lundi matin reste un seul créneau.
//! - Heure locale murale, sans date ni fuseau.
//! - Stockage fichier JSON (jour + heure locale), résumé texte pour le suivi.

pub mod adapter;
pub mod codec;
pub mod io;
pub mod model;
pub mod storage;
pub mod summary;

pub use adapter::{from_local, to_local, LocalShift};
pub use codec::{circular_overlaps, decode, encode, validate, CodecError, WeekCodec};
pub use model::{
    minute_of_week, Day, GridError, Resolution, ShiftInterval, WeekGrid, MINUTES_PER_DAY,
    MINUTES_PER_WEEK,
};
pub use storage::{JsonScheduleStore, MemoryScheduleStore, ScheduleStore};
pub use summary::{prepare_save_event, summarize, SaveEvent, ShiftSummary, SummaryRenderer, TextSummary};
