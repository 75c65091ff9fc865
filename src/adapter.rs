//! Correspondance avec la forme persistée côté stockage : jour + heure locale
//! au lieu de minute-de-semaine.

use crate::codec::{self, CodecError};
use crate::model::{Day, ShiftInterval, MINUTES_PER_DAY, MINUTES_PER_HOUR, MINUTES_PER_WEEK};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalShift {
    pub start_day: Day,
    pub start_time: NaiveTime,
    pub end_day: Day,
    pub end_time: NaiveTime,
    /// Fin exactement en fin de semaine (minute 10080), notée lundi 00:00.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub end_of_week: bool,
    pub duration_minutes: i64,
}

/// Convertit un créneau valide ; rejette ce que `codec::validate` rejetterait.
pub fn to_local(interval: &ShiftInterval) -> Result<LocalShift, CodecError> {
    codec::validate(std::slice::from_ref(interval))?;
    let end_of_week = interval.end_minute_of_week == MINUTES_PER_WEEK;
    let (start_day, start_time) = split_minute(interval.start_minute_of_week)?;
    let (end_day, end_time) = split_minute(interval.end_minute_of_week % MINUTES_PER_WEEK)?;
    Ok(LocalShift {
        start_day,
        start_time,
        end_day,
        end_time,
        end_of_week,
        duration_minutes: interval.duration_minutes,
    })
}

/// Inverse de [`to_local`]. Rejette une heure avec des secondes et un
/// `end_of_week` dont la fin stockée n'est pas lundi 00:00.
pub fn from_local(local: &LocalShift) -> Result<ShiftInterval, CodecError> {
    for time in [local.start_time, local.end_time] {
        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(CodecError::SubMinuteTime { time });
        }
    }
    let end = if local.end_of_week {
        if local.end_day != Day::Monday || local.end_time != NaiveTime::MIN {
            return Err(CodecError::EndOfWeekMismatch {
                day: local.end_day,
                time: local.end_time,
            });
        }
        MINUTES_PER_WEEK
    } else {
        join_minute(local.end_day, local.end_time)
    };
    let interval = ShiftInterval::new(
        join_minute(local.start_day, local.start_time),
        local.duration_minutes,
        end,
    );
    codec::validate(std::slice::from_ref(&interval))?;
    Ok(interval)
}

pub fn to_local_list(intervals: &[ShiftInterval]) -> Result<Vec<LocalShift>, CodecError> {
    codec::validate(intervals)?;
    intervals.iter().map(to_local).collect()
}

pub fn from_local_list(locals: &[LocalShift]) -> Result<Vec<ShiftInterval>, CodecError> {
    let intervals = locals
        .iter()
        .map(from_local)
        .collect::<Result<Vec<_>, _>>()?;
    codec::validate(&intervals)?;
    Ok(intervals)
}

/// Jour et heure locale `HH:MM` d'une minute-de-semaine dans `[0, 10080)`.
pub fn local_time_label(minute: i64) -> Result<(Day, String), CodecError> {
    let (day, time) = split_minute(minute)?;
    Ok((day, time.format("%H:%M").to_string()))
}

fn split_minute(minute: i64) -> Result<(Day, NaiveTime), CodecError> {
    let out_of_range = || CodecError::MinuteOutOfRange { minute };
    if !(0..MINUTES_PER_WEEK).contains(&minute) {
        return Err(out_of_range());
    }
    let day = u8::try_from(minute / MINUTES_PER_DAY)
        .ok()
        .and_then(Day::from_ordinal)
        .ok_or_else(out_of_range)?;
    let of_day = minute % MINUTES_PER_DAY;
    let hour = u32::try_from(of_day / MINUTES_PER_HOUR).map_err(|_| out_of_range())?;
    let min = u32::try_from(of_day % MINUTES_PER_HOUR).map_err(|_| out_of_range())?;
    let time = NaiveTime::from_hms_opt(hour, min, 0).ok_or_else(out_of_range)?;
    Ok((day, time))
}

fn join_minute(day: Day, time: NaiveTime) -> i64 {
    i64::from(day.to_ordinal()) * MINUTES_PER_DAY
        + i64::from(time.hour()) * MINUTES_PER_HOUR
        + i64::from(time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_interval_maps_to_sunday_night() {
        let wrap = ShiftInterval::new(10020, 180, 120);
        let local = to_local(&wrap).unwrap();
        assert_eq!(local.start_day, Day::Sunday);
        assert_eq!(local.start_time, NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert_eq!(local.end_day, Day::Monday);
        assert_eq!(local.end_time, NaiveTime::from_hms_opt(2, 0, 0).unwrap());
        assert!(!local.end_of_week);
        assert_eq!(from_local(&local).unwrap(), wrap);
    }

    #[test]
    fn end_of_week_is_not_confused_with_monday_midnight() {
        let whole = ShiftInterval::new(0, 10080, 10080);
        let local = to_local(&whole).unwrap();
        assert!(local.end_of_week);
        assert_eq!(from_local(&local).unwrap(), whole);

        let tail = ShiftInterval::new(10020, 60, 0);
        let local = to_local(&tail).unwrap();
        assert!(!local.end_of_week);
        assert_eq!(from_local(&local).unwrap(), tail);
    }

    #[test]
    fn invalid_interval_is_rejected_both_ways() {
        assert!(to_local(&ShiftInterval::new(60, 0, 60)).is_err());
        let local = LocalShift {
            start_day: Day::Friday,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_day: Day::Friday,
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_of_week: false,
            duration_minutes: 60,
        };
        assert!(matches!(
            from_local(&local),
            Err(CodecError::DegenerateSpan { .. })
        ));
    }

    #[test]
    fn time_label_uses_local_clock() {
        assert_eq!(
            local_time_label(1440 + 9 * 60 + 30).unwrap(),
            (Day::Tuesday, "09:30".to_string())
        );
        assert_eq!(
            local_time_label(10080),
            Err(CodecError::MinuteOutOfRange { minute: 10080 })
        );
        assert!(local_time_label(-1).is_err());
    }

    fn sunday_night_to_end_of_week(end_day: Day, end_time: NaiveTime) -> LocalShift {
        LocalShift {
            start_day: Day::Sunday,
            start_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            end_day,
            end_time,
            end_of_week: true,
            duration_minutes: 60,
        }
    }

    #[test]
    fn end_of_week_flag_requires_monday_midnight() {
        let ok = sunday_night_to_end_of_week(Day::Monday, NaiveTime::MIN);
        assert_eq!(from_local(&ok).unwrap(), ShiftInterval::new(10020, 60, 10080));

        let wed_time = NaiveTime::from_hms_opt(3, 17, 0).unwrap();
        let wednesday = sunday_night_to_end_of_week(Day::Wednesday, wed_time);
        assert_eq!(
            from_local(&wednesday),
            Err(CodecError::EndOfWeekMismatch {
                day: Day::Wednesday,
                time: wed_time,
            })
        );
        let half_past = NaiveTime::from_hms_opt(0, 30, 0).unwrap();
        let late = sunday_night_to_end_of_week(Day::Monday, half_past);
        assert!(matches!(
            from_local(&late),
            Err(CodecError::EndOfWeekMismatch { .. })
        ));
    }

    #[test]
    fn seconds_in_stored_times_are_rejected() {
        let mut local = to_local(&ShiftInterval::new(6300, 60, 6360)).unwrap();
        local.start_time = NaiveTime::from_hms_opt(9, 0, 59).unwrap();
        assert_eq!(
            from_local(&local),
            Err(CodecError::SubMinuteTime {
                time: NaiveTime::from_hms_opt(9, 0, 59).unwrap()
            })
        );

        let mut local = to_local(&ShiftInterval::new(6300, 60, 6360)).unwrap();
        local.end_time = NaiveTime::from_hms_opt(10, 0, 1).unwrap();
        assert!(matches!(
            from_local(&local),
            Err(CodecError::SubMinuteTime { .. })
        ));
    }
}
