#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use horaire::{
    codec::WeekCodec,
    io,
    model::Day,
    storage::{JsonScheduleStore, ScheduleStore},
    summary::{prepare_save_event, TextSummary},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning hebdomadaire (grille <-> créneaux)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du planning
    #[arg(long, global = true, default_value = "schedule.json")]
    schedule: String,

    /// Jours évalués, ex. "mon-fri,sun" (défaut : toute la semaine)
    #[arg(long = "resolve-days", global = true)]
    resolve_days: Option<String>,

    /// Heures évaluées, ex. "6-22" (défaut : 0-23)
    #[arg(long = "resolve-hours", global = true)]
    resolve_hours: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encoder une grille CSV (`day,hour[,on]`) et l'enregistrer
    Encode {
        #[arg(long)]
        csv: String,
    },

    /// Afficher la grille du planning enregistré
    Decode,

    /// Modifier des cellules de la grille puis réenregistrer
    Set {
        #[arg(long)]
        day: String,
        /// ex. "9-17" ou "8,12"
        #[arg(long)]
        hours: String,
        /// Passer les cellules à « off » au lieu de « on »
        #[arg(long)]
        off: bool,
    },

    /// Résumé texte des créneaux enregistrés
    Summary {
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: Option<String>,
    },

    /// Valider le planning enregistré
    Check,

    /// Exporter les créneaux
    Export {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let resolution =
        io::parse_resolution(cli.resolve_days.as_deref(), cli.resolve_hours.as_deref())?;
    let codec = WeekCodec::new(resolution);
    let storage = JsonScheduleStore::open(&cli.schedule)?;

    let code = match cli.cmd {
        Commands::Encode { csv } => {
            let grid = io::import_grid_csv(&csv).with_context(|| format!("importing {csv}"))?;
            let saved = storage.save(&codec.encode(&grid))?;
            let event = prepare_save_event(&saved, &TextSummary)?;
            print!("{}", event.content);
            println!("Saved to {}", storage.path().display());
            0
        }
        Commands::Decode => {
            let grid = codec.decode(&storage.fetch()?)?;
            if !codec.resolution().is_full() {
                eprintln!("note: partial resolution, unresolved cells shown as off");
            }
            print!("{grid}");
            0
        }
        Commands::Set { day, hours, off } => {
            let day: Day = day.parse()?;
            let hours = io::parse_hours(&hours)?;
            let mut grid = codec.decode(&storage.fetch()?)?;
            for hour in hours {
                grid.set(day, hour, !off)?;
            }
            let saved = storage.save(&codec.encode(&grid))?;
            let event = prepare_save_event(&saved, &TextSummary)?;
            print!("{}", event.content);
            println!("Saved to {}", storage.path().display());
            0
        }
        Commands::Summary { out } => {
            let event = prepare_save_event(&storage.fetch()?, &TextSummary)?;
            match out {
                Some(path) => std::fs::write(&path, &event.content)?,
                None => print!("{}", event.content),
            }
            0
        }
        Commands::Check => match storage.fetch() {
            Ok(intervals) => {
                println!("OK: {} shift(s)", intervals.len());
                0
            }
            Err(err) => {
                eprintln!("invalid schedule: {err:#}");
                // Code 2 = planning invalide
                2
            }
        },
        Commands::Export { out_json, out_csv } => {
            let intervals = storage.fetch()?;
            if let Some(path) = out_json {
                io::export_intervals_json(path, &intervals)?;
            }
            if let Some(path) = out_csv {
                io::export_intervals_csv(path, &intervals)?;
            }
            for iv in &intervals {
                println!(
                    "{} -> {} | {} min{}",
                    iv.start_minute_of_week,
                    iv.end_minute_of_week,
                    iv.duration_minutes,
                    if iv.wraps() { " (wraps)" } else { "" }
                );
            }
            0
        }
    };

    std::process::exit(code);
}
