use crate::model::{Day, GridError};
use chrono::NaiveTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("interval #{index}: duration must be positive (got {duration})")]
    NonPositiveDuration { index: usize, duration: i64 },
    #[error("interval #{index}: start minute {start} outside [0, 10080)")]
    StartOutOfRange { index: usize, start: i64 },
    #[error("interval #{index}: end minute {end} outside [0, 10080]")]
    EndOutOfRange { index: usize, end: i64 },
    #[error("interval #{index}: start and end are both {minute}")]
    DegenerateSpan { index: usize, minute: i64 },
    #[error("ambiguous wraparound: intervals #{first} and #{second} both cross the week boundary")]
    MultipleWraparounds { first: usize, second: usize },
    #[error("intervals #{first} and #{second} overlap")]
    Overlap { first: usize, second: usize },
    #[error("minute {minute} outside the week")]
    MinuteOutOfRange { minute: i64 },
    #[error("end_of_week set but stored end is {day} {time} (expected monday 00:00)")]
    EndOfWeekMismatch { day: Day, time: NaiveTime },
    #[error("local time {time} is not a whole minute")]
    SubMinuteTime { time: NaiveTime },
    #[error(transparent)]
    Grid(#[from] GridError),
}
