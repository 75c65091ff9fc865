use crate::adapter::local_time_label;
use crate::codec::{self, CodecError};
use crate::model::ShiftInterval;
use anyhow::Result;
use serde::Serialize;

/// Résumé d'un créneau pour l'événement de suivi émis à l'enregistrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftSummary {
    pub day: String,
    pub start_time: String,
    pub duration_minutes: i64,
}

/// Événement de suivi préparé après un enregistrement.
#[derive(Debug, Clone, Serialize)]
pub struct SaveEvent {
    pub shifts: Vec<ShiftSummary>,
    pub total_minutes: i64,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, JSON, etc.).
pub trait SummaryRenderer {
    fn render(&self, shifts: &[ShiftSummary], total_minutes: i64) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl SummaryRenderer for TextSummary {
    fn render(&self, shifts: &[ShiftSummary], total_minutes: i64) -> String {
        let mut out = format!(
            "Planning enregistré : {} créneau(x), {} au total.\n",
            shifts.len(),
            format_duration(total_minutes)
        );
        for s in shifts {
            out.push_str(&format!(
                "- {} {} ({})\n",
                s.day,
                s.start_time,
                format_duration(s.duration_minutes)
            ));
        }
        out
    }
}

pub fn summarize(intervals: &[ShiftInterval]) -> Result<Vec<ShiftSummary>, CodecError> {
    intervals
        .iter()
        .map(|iv| {
            let (day, start_time) = local_time_label(iv.start_minute_of_week)?;
            Ok(ShiftSummary {
                day: day.name().to_string(),
                start_time,
                duration_minutes: iv.duration_minutes,
            })
        })
        .collect()
}

/// Prépare l'événement de suivi d'un enregistrement ; la liste doit être valide.
pub fn prepare_save_event(
    intervals: &[ShiftInterval],
    renderer: &dyn SummaryRenderer,
) -> Result<SaveEvent> {
    codec::validate(intervals)?;
    let shifts = summarize(intervals)?;
    let total_minutes = intervals.iter().map(|iv| iv.duration_minutes).sum();
    let content = renderer.render(&shifts, total_minutes);
    Ok(SaveEvent {
        shifts,
        total_minutes,
        content,
    })
}

fn format_duration(minutes: i64) -> String {
    format!("{}h{:02}", minutes / 60, minutes % 60)
}
