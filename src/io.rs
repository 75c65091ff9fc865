use crate::adapter::local_time_label;
use crate::model::{Day, Resolution, ShiftInterval, WeekGrid, HOURS_PER_DAY};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Import d'une grille depuis CSV: header `day,hour[,on]` (`on` vaut vrai par défaut).
/// Une ligne ultérieure écrase une ligne précédente pour la même cellule.
pub fn import_grid_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<WeekGrid> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut grid = WeekGrid::empty();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let day: Day = rec
            .get(0)
            .context("missing day")?
            .parse()
            .with_context(|| format!("row {row}"))?;
        let hour = rec.get(1).context("missing hour")?.trim();
        let hour = parse_hour(hour).with_context(|| format!("row {row}"))?;
        let on = match rec.get(2).map(str::trim) {
            Some(flag) if !flag.is_empty() => {
                parse_bool(flag).with_context(|| format!("invalid on value at row {row}"))?
            }
            _ => true,
        };
        grid.set(day, hour, on)?;
    }
    Ok(grid)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "off" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

fn parse_hour(raw: &str) -> anyhow::Result<u8> {
    let hour: u8 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid hour: {raw}"))?;
    if hour >= HOURS_PER_DAY {
        bail!("hour out of range (0..=23): {hour}");
    }
    Ok(hour)
}

/// `"mon,wed-fri"` -> {lundi, mercredi, jeudi, vendredi}.
pub fn parse_days(raw: &str) -> anyhow::Result<BTreeSet<Day>> {
    let mut out: BTreeSet<Day> = BTreeSet::new();
    for chunk in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if let Some((from, to)) = chunk.split_once('-') {
            let from: Day = from.parse()?;
            let to: Day = to.parse()?;
            if to < from {
                bail!("day range goes backwards: {chunk}");
            }
            out.extend(
                Day::ALL
                    .into_iter()
                    .filter(|d| (from..=to).contains(d)),
            );
        } else {
            out.insert(chunk.parse::<Day>()?);
        }
    }
    if out.is_empty() {
        bail!("no day given");
    }
    Ok(out)
}

/// `"8-20,22"` -> {8, 9, …, 20, 22} ; bornes incluses.
pub fn parse_hours(raw: &str) -> anyhow::Result<BTreeSet<u8>> {
    let mut out: BTreeSet<u8> = BTreeSet::new();
    for chunk in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if let Some((from, to)) = chunk.split_once('-') {
            let from = parse_hour(from)?;
            let to = parse_hour(to)?;
            if to < from {
                bail!("hour range goes backwards: {chunk}");
            }
            out.extend(from..=to);
        } else {
            out.insert(parse_hour(chunk)?);
        }
    }
    if out.is_empty() {
        bail!("no hour given");
    }
    Ok(out)
}

/// Résolution à partir des options texte ; un champ absent couvre tout le domaine.
pub fn parse_resolution(days: Option<&str>, hours: Option<&str>) -> anyhow::Result<Resolution> {
    let days = match days {
        Some(raw) => parse_days(raw)?,
        None => Day::ALL.into_iter().collect(),
    };
    let hours = match hours {
        Some(raw) => parse_hours(raw)?,
        None => (0..HOURS_PER_DAY).collect(),
    };
    Ok(Resolution::new(days, hours)?)
}

/// Export JSON des créneaux (jolie mise en forme)
pub fn export_intervals_json<P: AsRef<Path>>(
    path: P,
    intervals: &[ShiftInterval],
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(intervals)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV: header `start_minute_of_week,duration_minutes,end_minute_of_week,day,start_time`
pub fn export_intervals_csv<P: AsRef<Path>>(
    path: P,
    intervals: &[ShiftInterval],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "start_minute_of_week",
        "duration_minutes",
        "end_minute_of_week",
        "day",
        "start_time",
    ])?;
    for iv in intervals {
        let (day, start_time) = local_time_label(iv.start_minute_of_week)?;
        w.write_record([
            iv.start_minute_of_week.to_string().as_str(),
            iv.duration_minutes.to_string().as_str(),
            iv.end_minute_of_week.to_string().as_str(),
            day.name(),
            start_time.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn import_str(content: &str) -> anyhow::Result<WeekGrid> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.csv");
        fs::write(&path, content).unwrap();
        import_grid_csv(&path)
    }

    #[test]
    fn grid_csv_with_optional_flag() {
        let grid =
            import_str("day,hour,on\nmonday,0,\nsun,23,oui\nmonday,0,off\ntue,9,1\n").unwrap();
        assert_eq!(grid.count_on(), 2);
        assert!(!grid.get(Day::Monday, 0));
        assert!(grid.get(Day::Sunday, 23));
        assert!(grid.get(Day::Tuesday, 9));
    }

    #[test]
    fn grid_csv_rejects_unknown_day() {
        let err = import_str("day,hour\nmonday,3\nlundi,4\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("row 3"), "{msg}");
        assert!(msg.contains("unknown day: lundi"), "{msg}");
    }

    #[test]
    fn grid_csv_rejects_hour_24() {
        let err = import_str("day,hour\nfriday,24\n").unwrap_err();
        assert!(format!("{err:#}").contains("hour out of range"));
        assert!(import_str("day,hour\nfriday,-1\n").is_err());
    }

    #[test]
    fn grid_csv_rejects_bad_flag() {
        let err = import_str("day,hour,on\nfriday,8,maybe\n").unwrap_err();
        assert!(format!("{err:#}").contains("invalid on value at row 2"));
    }

    fn sample_intervals() -> Vec<ShiftInterval> {
        vec![
            ShiftInterval::new(10020, 180, 120),
            ShiftInterval::new(3480, 120, 3600),
        ]
    }

    #[test]
    fn csv_export_has_header_and_wrapping_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shifts.csv");
        export_intervals_csv(&path, &sample_intervals()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().collect::<Vec<_>>(),
            vec![
                "start_minute_of_week,duration_minutes,end_minute_of_week,day,start_time",
                "10020,180,120,sunday,23:00",
                "3480,120,3600,wednesday,10:00",
            ]
        );
    }

    #[test]
    fn json_export_keeps_wraparound_marker() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shifts.json");
        export_intervals_json(&path, &sample_intervals()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"end_minute_of_week\": 120"));
        let back: Vec<ShiftInterval> = serde_json::from_str(&content).unwrap();
        assert_eq!(back, sample_intervals());
        assert!(back[0].wraps());
    }

    #[test]
    fn day_list_with_ranges() {
        let days = parse_days("mon, wed-fri").unwrap();
        assert_eq!(
            days.into_iter().collect::<Vec<_>>(),
            vec![Day::Monday, Day::Wednesday, Day::Thursday, Day::Friday]
        );
        assert!(parse_days("fri-mon").is_err());
        assert!(parse_days("").is_err());
    }

    #[test]
    fn hour_list_with_ranges() {
        let hours = parse_hours("8-10,22").unwrap();
        assert_eq!(hours.into_iter().collect::<Vec<_>>(), vec![8, 9, 10, 22]);
        assert!(parse_hours("23-24").is_err());
        assert!(parse_hours("x").is_err());
    }

    #[test]
    fn missing_options_give_full_resolution() {
        assert!(parse_resolution(None, None).unwrap().is_full());
        assert!(!parse_resolution(Some("sat,sun"), None).unwrap().is_full());
    }
}
