//! delve: preview seeded dungeon layouts
//!
//! Generates one layout and prints it as an ASCII map, a summary line, or
//! JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{debug, error, info, warn};
use strum::{Display, EnumString};
use thiserror::Error;

use delve_core::{
    ConfigError, Difficulty, DungeonConfig, DungeonGenerator, DungeonLayout, DungeonRng,
    GenerationError, PlacementBias,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum OutputFormat {
    Ascii,
    Summary,
    Json,
}

/// Generate a dungeon layout
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Seeded procedural dungeon layouts", long_about = None)]
struct Args {
    /// Seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Difficulty preset (easy/medium/hard/epic)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Grid side length in cells
    #[arg(long)]
    size: Option<u32>,

    /// Smallest room side, inclusive
    #[arg(long = "room-min")]
    room_min: Option<u32>,

    /// Largest room side, exclusive
    #[arg(long = "room-max")]
    room_max: Option<u32>,

    #[arg(long = "corridor-width")]
    corridor_width: Option<u32>,

    #[arg(long = "max-rooms")]
    max_rooms: Option<u32>,

    /// Rooms required for a layout to count
    #[arg(long = "min-rooms")]
    min_rooms: Option<u32>,

    /// Room placement attempt budget
    #[arg(long = "max-attempts")]
    max_attempts: Option<u32>,

    /// Placement bias (progressive/uniform)
    #[arg(long)]
    bias: Option<PlacementBias>,

    /// Extra tries, with the next seed each time, when too few rooms fit
    #[arg(long, default_value_t = 5)]
    retries: u32,

    /// Output format (ascii/summary/json)
    #[arg(short, long, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Verbose output, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("could not encode layout: {0}")]
    Json(#[from] serde_json::Error),
}

impl Args {
    /// Build the configuration: file or defaults, then preset, then flags
    fn dungeon_config(&self) -> Result<DungeonConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DungeonConfig::load_from_file(path)?,
            None => DungeonConfig::default(),
        };
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty);
        }

        let overrides = [
            (self.size, &mut config.dungeon_size),
            (self.room_min, &mut config.room_size_min),
            (self.room_max, &mut config.room_size_max),
            (self.corridor_width, &mut config.corridor_width),
            (self.max_rooms, &mut config.max_rooms),
            (self.min_rooms, &mut config.min_required_rooms),
            (self.max_attempts, &mut config.max_attempts),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(bias) = self.bias {
            config.placement_bias = bias;
        }

        config.validate()?;
        Ok(config)
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Generate from `seed`, moving to the next seed while rooms do not fit
fn generate_with_retries(
    generator: &DungeonGenerator,
    seed: u64,
    retries: u32,
) -> Result<DungeonLayout, GenerationError> {
    let mut attempt = 0;
    loop {
        let result = generator.generate_seeded(seed.wrapping_add(attempt as u64));
        match result {
            Err(err) if err.is_retryable() && attempt < retries => {
                warn!("could not generate dungeon, retrying… ({})", err);
                attempt += 1;
            }
            other => return other,
        }
    }
}

fn render(layout: &DungeonLayout, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Ascii => format!("{}{}\n", layout, layout.stats()),
        OutputFormat::Summary => format!("seed {}: {}\n", layout.seed, layout.stats()),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(layout)?),
    })
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = args.dungeon_config()?;
    let seed = args
        .seed
        .unwrap_or_else(|| DungeonRng::from_entropy().seed());
    info!("using seed {}", seed);

    let generator = DungeonGenerator::new(config);
    debug!("{:?}", generator.config());
    let layout = generate_with_retries(&generator, seed, args.retries)?;
    if layout.seed != seed {
        eprintln!("seed: {} (requested {})", layout.seed, seed);
    } else {
        eprintln!("seed: {}", layout.seed);
    }

    print!("{}", render(&layout, args.format)?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let env = env_logger::Env::default().default_filter_or(args.log_level());
    env_logger::Builder::from_env(env).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let argv = std::iter::once("delve").chain(args.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.retries, 5);
        assert_eq!(args.format, OutputFormat::Ascii);
        assert_eq!(args.log_level(), "warn");
        assert_eq!(args.dungeon_config().unwrap(), DungeonConfig::default());
    }

    #[test]
    fn test_flags_override_preset() {
        let args = parse(&["--difficulty", "Hard", "--max-rooms", "4", "--size", "40"]);
        let config = args.dungeon_config().unwrap();
        assert_eq!(config.max_rooms, 4);
        assert_eq!(config.room_size_max, 14);
        assert_eq!(config.dungeon_size, 40);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = parse(&["--room-min", "9", "--room-max", "9"]);
        assert!(matches!(
            args.dungeon_config(),
            Err(ConfigError::Invalid {
                field: "room_size_max",
                ..
            })
        ));
    }

    #[test]
    fn test_corridor_wider_than_grid_rejected() {
        let args = parse(&["--size", "20", "--corridor-width", "3000000000"]);
        assert!(matches!(
            args.dungeon_config(),
            Err(ConfigError::Invalid {
                field: "corridor_width",
                ..
            })
        ));
    }

    #[test]
    fn test_format_and_bias_parse() {
        let args = parse(&["-f", "json", "--bias", "uniform", "-vv"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.bias, Some(PlacementBias::Uniform));
        assert_eq!(args.log_level(), "debug");
        assert!(Args::try_parse_from(["delve", "--format", "svg"]).is_err());
    }

    #[test]
    fn test_retries_exhausted() {
        let generator = DungeonGenerator::new(DungeonConfig {
            dungeon_size: 10,
            room_size_min: 8,
            room_size_max: 9,
            ..DungeonConfig::default()
        });
        let result = generate_with_retries(&generator, 1, 2);
        assert!(matches!(
            result,
            Err(GenerationError::InsufficientRooms { .. })
        ));
    }

    #[test]
    fn test_retry_keeps_first_seed_when_it_works() {
        let generator = DungeonGenerator::default();
        let expected = generator.generate_seeded(42);
        if let Ok(expected) = expected {
            let layout = generate_with_retries(&generator, 42, 5).unwrap();
            assert_eq!(layout, expected);
        }
    }

    #[test]
    fn test_render_summary() {
        let layout = DungeonGenerator::default().generate_seeded(8).unwrap();
        let summary = render(&layout, OutputFormat::Summary).unwrap();
        assert!(summary.starts_with("seed 8: "));
        let json = render(&layout, OutputFormat::Json).unwrap();
        let parsed: DungeonLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, layout);
    }
}
