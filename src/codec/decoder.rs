use super::util::{self, Span};
use super::CodecError;
use crate::model::{minute_of_week, Resolution, ShiftInterval, WeekGrid, MINUTES_PER_WEEK};

pub(super) fn validate(intervals: &[ShiftInterval]) -> Result<(), CodecError> {
    let mut wrapping: Option<usize> = None;

    for (index, interval) in intervals.iter().enumerate() {
        let start = interval.start_minute_of_week;
        let end = interval.end_minute_of_week;
        if interval.duration_minutes <= 0 {
            return Err(CodecError::NonPositiveDuration {
                index,
                duration: interval.duration_minutes,
            });
        }
        if !(0..MINUTES_PER_WEEK).contains(&start) {
            return Err(CodecError::StartOutOfRange { index, start });
        }
        if !(0..=MINUTES_PER_WEEK).contains(&end) {
            return Err(CodecError::EndOutOfRange { index, end });
        }
        if start == end {
            return Err(CodecError::DegenerateSpan {
                index,
                minute: start,
            });
        }
        if interval.wraps() {
            if let Some(first) = wrapping {
                return Err(CodecError::MultipleWraparounds {
                    first,
                    second: index,
                });
            }
            wrapping = Some(index);
        }
    }

    for (i, a) in intervals.iter().enumerate() {
        for (j, b) in intervals.iter().enumerate().skip(i + 1) {
            if util::circular_overlaps(a, b) {
                return Err(CodecError::Overlap {
                    first: i,
                    second: j,
                });
            }
        }
    }

    Ok(())
}

pub(super) fn decode(
    intervals: &[ShiftInterval],
    resolution: &Resolution,
) -> Result<WeekGrid, CodecError> {
    if let Err(err) = validate(intervals) {
        #[cfg(feature = "logging")]
        tracing::warn!(error = %err, "rejecting interval list");
        return Err(err);
    }

    let spans: Vec<Span> = intervals.iter().flat_map(util::linear_spans).collect();
    let mut grid = WeekGrid::empty();

    for day in resolution.days() {
        for hour in resolution.hours() {
            let cursor = minute_of_week(*day, *hour);
            debug_assert!(cursor < MINUTES_PER_WEEK, "cell cursor past end of week");
            if spans.iter().any(|(s, e)| *s <= cursor && cursor < *e) {
                grid.set(*day, *hour, true)?;
            }
        }
    }

    Ok(grid)
}
