use crate::model::{ShiftInterval, MINUTES_PER_WEEK};

/// Plage demi-ouverte `[start, end)` sur la semaine linéaire.
pub(super) type Span = (i64, i64);

/// Découpe un créneau en plages linéaires : un créneau qui boucle devient
/// `[0, end)` et `[start, 10080)`.
pub(super) fn linear_spans(interval: &ShiftInterval) -> Vec<Span> {
    let start = interval.start_minute_of_week;
    let end = interval.end_minute_of_week;
    if interval.wraps() {
        [(0, end), (start, MINUTES_PER_WEEK)]
            .into_iter()
            .filter(|(s, e)| s < e)
            .collect()
    } else {
        vec![(start, end)]
    }
}

pub(super) fn spans_overlap(a: Span, b: Span) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Vrai si les deux créneaux partagent au moins une minute de la semaine circulaire.
pub fn circular_overlaps(a: &ShiftInterval, b: &ShiftInterval) -> bool {
    let a_spans = linear_spans(a);
    let b_spans = linear_spans(b);
    a_spans
        .iter()
        .any(|sa| b_spans.iter().any(|sb| spans_overlap(*sa, *sb)))
}
