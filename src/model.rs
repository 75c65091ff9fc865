use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
/// Longueur (exclusive) de la semaine canonique, en minutes.
pub const MINUTES_PER_WEEK: i64 = 7 * MINUTES_PER_DAY;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("hour out of range (0..=23): {0}")]
    HourOutOfRange(i64),
}

/// Jour de la semaine, ordinal fixe Monday=0 … Sunday=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn to_ordinal(self) -> u8 {
        match self {
            Day::Monday => 0,
            Day::Tuesday => 1,
            Day::Wednesday => 2,
            Day::Thursday => 3,
            Day::Friday => 4,
            Day::Saturday => 5,
            Day::Sunday => 6,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Day> {
        Day::ALL.get(usize::from(ordinal)).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = GridError;

    /// Accepte le nom complet, l'abréviation à 3 lettres ou l'ordinal `0..=6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        if let Ok(n) = raw.parse::<u8>() {
            return Day::from_ordinal(n).ok_or_else(|| GridError::UnknownDay(s.to_string()));
        }
        Day::ALL
            .into_iter()
            .find(|d| d.name() == raw || d.short_name() == raw)
            .ok_or_else(|| GridError::UnknownDay(s.to_string()))
    }
}

impl From<Weekday> for Day {
    fn from(w: Weekday) -> Self {
        // Weekday::num_days_from_monday() suit le même ordre que Day
        Day::ALL[w.num_days_from_monday() as usize]
    }
}

impl From<Day> for Weekday {
    fn from(d: Day) -> Self {
        match d {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }
}

/// Minute de la semaine pour (jour, heure) ; seul endroit où l'ordinal du jour
/// entre dans un calcul.
pub fn minute_of_week(day: Day, hour: u8) -> i64 {
    i64::from(day.to_ordinal()) * MINUTES_PER_DAY + i64::from(hour) * MINUTES_PER_HOUR
}

/// Grille hebdomadaire dense 7×24 : `true` = « je travaille à cette heure ».
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekGrid {
    cells: [[bool; HOURS_PER_DAY as usize]; 7],
}

impl WeekGrid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn full() -> Self {
        Self {
            cells: [[true; HOURS_PER_DAY as usize]; 7],
        }
    }

    /// Heure hors plage = « off » (cellule absente).
    pub fn get(&self, day: Day, hour: u8) -> bool {
        self.cells[usize::from(day.to_ordinal())]
            .get(usize::from(hour))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, day: Day, hour: u8, on: bool) -> Result<(), GridError> {
        let row = &mut self.cells[usize::from(day.to_ordinal())];
        let cell = row
            .get_mut(usize::from(hour))
            .ok_or(GridError::HourOutOfRange(i64::from(hour)))?;
        *cell = on;
        Ok(())
    }

    pub fn count_on(&self) -> usize {
        self.cells_on().count()
    }

    /// Cellules actives, dans l'ordre minute-de-semaine.
    pub fn cells_on(&self) -> impl Iterator<Item = (Day, u8)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            (0..HOURS_PER_DAY).filter_map(move |hour| self.get(day, hour).then_some((day, hour)))
        })
    }

    /// Construit une grille à partir de cellules nommées (`"monday"`, 8).
    /// Les cellules absentes restent à `false` ; une clé inconnue est rejetée.
    pub fn from_named_cells<I, S>(cells: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut grid = Self::empty();
        for (day, hour) in cells {
            let day: Day = day.as_ref().parse()?;
            let hour = u8::try_from(hour)
                .ok()
                .filter(|h| *h < HOURS_PER_DAY)
                .ok_or(GridError::HourOutOfRange(hour))?;
            grid.set(day, hour, true)?;
        }
        Ok(grid)
    }
}

impl fmt::Display for WeekGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in Day::ALL {
            write!(f, "{} ", day.short_name())?;
            for hour in 0..HOURS_PER_DAY {
                f.write_str(if self.get(day, hour) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Créneau de travail contigu sur la semaine circulaire.
///
/// `end_minute_of_week < start_minute_of_week` signale un créneau qui passe
/// de dimanche à lundi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftInterval {
    pub start_minute_of_week: i64,
    pub duration_minutes: i64,
    pub end_minute_of_week: i64,
}

impl ShiftInterval {
    pub fn new(start_minute_of_week: i64, duration_minutes: i64, end_minute_of_week: i64) -> Self {
        Self {
            start_minute_of_week,
            duration_minutes,
            end_minute_of_week,
        }
    }

    pub fn wraps(&self) -> bool {
        self.end_minute_of_week < self.start_minute_of_week
    }

    pub fn is_empty(&self) -> bool {
        self.duration_minutes == 0
    }
}

/// Jours et heures que le codec évalue ; le reste est traité comme une
/// continuation transparente du créneau ouvert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    days: BTreeSet<Day>,
    hours: BTreeSet<u8>,
}

impl Resolution {
    pub fn new<D, H>(days: D, hours: H) -> Result<Self, GridError>
    where
        D: IntoIterator<Item = Day>,
        H: IntoIterator<Item = u8>,
    {
        let hours: BTreeSet<u8> = hours.into_iter().collect();
        if let Some(bad) = hours.iter().find(|h| **h >= HOURS_PER_DAY) {
            return Err(GridError::HourOutOfRange(i64::from(*bad)));
        }
        Ok(Self {
            days: days.into_iter().collect(),
            hours,
        })
    }

    pub fn full() -> Self {
        Self {
            days: Day::ALL.into_iter().collect(),
            hours: (0..HOURS_PER_DAY).collect(),
        }
    }

    pub fn days(&self) -> &BTreeSet<Day> {
        &self.days
    }

    pub fn hours(&self) -> &BTreeSet<u8> {
        &self.hours
    }

    pub fn resolves_day(&self, day: Day) -> bool {
        self.days.contains(&day)
    }

    pub fn resolves_hour(&self, hour: u8) -> bool {
        self.hours.contains(&hour)
    }

    pub fn is_full(&self) -> bool {
        self.days.len() == Day::ALL.len() && self.hours.len() == usize::from(HOURS_PER_DAY)
    }

    /// Première minute évaluée de la semaine (0 pour une résolution complète).
    pub fn first_resolved_minute(&self) -> Option<i64> {
        let day = self.days.iter().next()?;
        let hour = self.hours.iter().next()?;
        Some(minute_of_week(*day, *hour))
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::full()
    }
}
