use crate::model::{
    Day, Resolution, ShiftInterval, WeekGrid, HOURS_PER_DAY, MINUTES_PER_DAY, MINUTES_PER_HOUR,
};

/// Créneau en cours de lecture (pas encore fermé).
#[derive(Debug, Clone, Copy)]
struct OpenShift {
    start: i64,
    duration: i64,
}

impl OpenShift {
    fn extend(self, minutes: i64) -> Self {
        Self {
            duration: self.duration + minutes,
            ..self
        }
    }

    fn close(self, end: i64) -> ShiftInterval {
        ShiftInterval::new(self.start, self.duration, end)
    }
}

/// Parcourt la grille dans l'ordre minute-de-semaine et émet les créneaux
/// maximaux. Le premier créneau fermé (l'ancre) est gardé de côté jusqu'à la
/// fin du parcours : s'il débute la semaine et que dimanche soir est travaillé,
/// le créneau de fin de semaine y est fusionné au lieu d'être émis à part.
pub(super) fn encode(grid: &WeekGrid, resolution: &Resolution) -> Vec<ShiftInterval> {
    let mut t = 0i64;
    let mut open: Option<OpenShift> = None;
    let mut anchor_minute: Option<i64> = None;
    let mut anchor: Option<ShiftInterval> = None;
    let mut rest = Vec::new();

    for day in Day::ALL {
        if !resolution.resolves_day(day) {
            t += MINUTES_PER_DAY;
            open = open.map(|shift| shift.extend(MINUTES_PER_DAY));
            continue;
        }
        for hour in 0..HOURS_PER_DAY {
            if !resolution.resolves_hour(hour) {
                t += MINUTES_PER_HOUR;
                open = open.map(|shift| shift.extend(MINUTES_PER_HOUR));
                continue;
            }
            match (open, grid.get(day, hour)) {
                (None, true) => {
                    open = Some(OpenShift {
                        start: t,
                        duration: MINUTES_PER_HOUR,
                    });
                    anchor_minute.get_or_insert(t);
                }
                (Some(shift), true) => open = Some(shift.extend(MINUTES_PER_HOUR)),
                (Some(shift), false) => {
                    let closed = shift.close(t);
                    if anchor.is_none() {
                        anchor = Some(closed);
                    } else {
                        rest.push(closed);
                    }
                    open = None;
                }
                (None, false) => {}
            }
            t += MINUTES_PER_HOUR;
        }
    }

    if let Some(trailing) = open {
        let week_starts_on_shift =
            anchor_minute.is_some() && anchor_minute == resolution.first_resolved_minute();
        anchor = match (anchor, week_starts_on_shift) {
            // fin = fin d'origine de l'ancre, d'où start > end
            (Some(first), true) => Some(ShiftInterval {
                start_minute_of_week: trailing.start,
                duration_minutes: first.duration_minutes + trailing.duration,
                ..first
            }),
            // jamais fermé depuis le début : toute la semaine
            (None, true) => Some(trailing.close(trailing.start + trailing.duration)),
            (first, false) => {
                rest.push(trailing.close(0));
                first
            }
        };
    }

    let out: Vec<ShiftInterval> = anchor.into_iter().chain(rest).collect();
    debug_assert!(
        !out.iter().any(ShiftInterval::is_empty),
        "zero-length shift emitted"
    );
    #[cfg(feature = "logging")]
    tracing::debug!(
        intervals = out.len(),
        wraps = out.iter().any(ShiftInterval::wraps),
        "encoded weekly grid"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(Day, u8)]) -> WeekGrid {
        let mut grid = WeekGrid::empty();
        for (day, hour) in cells {
            grid.set(*day, *hour, true).unwrap();
        }
        grid
    }

    #[test]
    fn single_hour_closes_on_next_cell() {
        let grid = grid_with(&[(Day::Tuesday, 9)]);
        let out = encode(&grid, &Resolution::full());
        assert_eq!(out, vec![ShiftInterval::new(1440 + 540, 60, 1440 + 600)]);
    }

    #[test]
    fn anchor_stays_first_after_merge() {
        let grid = grid_with(&[
            (Day::Monday, 0),
            (Day::Wednesday, 10),
            (Day::Sunday, 22),
            (Day::Sunday, 23),
        ]);
        let out = encode(&grid, &Resolution::full());
        assert_eq!(
            out,
            vec![
                ShiftInterval::new(9960, 180, 60),
                ShiftInterval::new(2880 + 600, 60, 2880 + 660),
            ]
        );
    }

    #[test]
    fn sunday_night_alone_closes_at_zero() {
        let grid = grid_with(&[(Day::Sunday, 23)]);
        let out = encode(&grid, &Resolution::full());
        assert_eq!(out, vec![ShiftInterval::new(10020, 60, 0)]);
    }

    #[test]
    fn trailing_shift_appended_when_week_starts_off() {
        let grid = grid_with(&[(Day::Monday, 5), (Day::Sunday, 23)]);
        let out = encode(&grid, &Resolution::full());
        assert_eq!(
            out,
            vec![
                ShiftInterval::new(300, 60, 360),
                ShiftInterval::new(10020, 60, 0),
            ]
        );
    }

    #[test]
    fn unresolved_hours_bridge_open_shift() {
        // seules les heures paires sont évaluées
        let resolution = Resolution::new(Day::ALL, (0..24).step_by(2)).unwrap();
        let grid = grid_with(&[(Day::Monday, 8), (Day::Monday, 10)]);
        let out = encode(&grid, &resolution);
        // 8h, 9h (pont), 10h, 11h (pont) puis fermeture à 12h
        assert_eq!(out, vec![ShiftInterval::new(480, 240, 720)]);
    }

    #[test]
    fn unresolved_day_bridges_open_shift() {
        let days = Day::ALL.into_iter().filter(|d| *d != Day::Tuesday);
        let resolution = Resolution::new(days, 0..24).unwrap();
        let grid = grid_with(&[(Day::Monday, 23), (Day::Wednesday, 0)]);
        let out = encode(&grid, &resolution);
        assert_eq!(out, vec![ShiftInterval::new(1380, 60 + 1440 + 60, 2940)]);
    }
}
