//! Codec grille hebdomadaire <-> créneaux.
//!
//! Les deux sens sont des fonctions pures : aucune I/O, aucun état partagé.

mod decoder;
mod encoder;
mod types;
mod util;

pub use types::CodecError;
pub use util::circular_overlaps;

use crate::model::{Resolution, ShiftInterval, WeekGrid};

/// Liste minimale et ordonnée des créneaux maximaux de la grille.
pub fn encode(grid: &WeekGrid, resolution: &Resolution) -> Vec<ShiftInterval> {
    encoder::encode(grid, resolution)
}

/// Reconstruit la grille ; la liste est validée avant toute lecture.
pub fn decode(intervals: &[ShiftInterval], resolution: &Resolution) -> Result<WeekGrid, CodecError> {
    decoder::decode(intervals, resolution)
}

/// Vérifie durées, bornes, créneau dégénéré, unicité du bouclage et chevauchements.
pub fn validate(intervals: &[ShiftInterval]) -> Result<(), CodecError> {
    decoder::validate(intervals)
}

/// Codec lié à une résolution donnée.
#[derive(Debug, Clone, Default)]
pub struct WeekCodec {
    resolution: Resolution,
}

impl WeekCodec {
    pub fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn encode(&self, grid: &WeekGrid) -> Vec<ShiftInterval> {
        encode(grid, &self.resolution)
    }

    pub fn decode(&self, intervals: &[ShiftInterval]) -> Result<WeekGrid, CodecError> {
        decode(intervals, &self.resolution)
    }
}
