use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use freqi::render::{tones_to_wav, DEFAULT_SAMPLE_RATE};
use freqi::{Engine, CHROMATIC_SCALE};
use serde_json::Value;

fn parse_duration(s: &str) -> Result<Duration, std::num::ParseIntError> {
    let ms: u64 = s.parse()?;
    Ok(Duration::from_millis(ms))
}

/// Equal temperament frequencies for scales, chords and interval patterns
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the frequencies of a scale or chord as a JSON array
    Scale {
        /// JSON config file, or - for stdin
        config: PathBuf,
    },
    /// Print the frequency of a single note
    Freq {
        /// JSON config file, or - for stdin
        config: PathBuf,
    },
    /// Print an augmented interval pattern as a JSON array
    Augment {
        /// JSON config file, or - for stdin
        config: PathBuf,
    },
    /// Print a multi-octave scale centred on a start frequency
    Octaves {
        /// JSON config file, or - for stdin; defaults apply when omitted
        config: Option<PathBuf>,
    },
    /// Print the chromatic pitch-class names
    Notes,
    /// Render a scale as back-to-back sine tones into a WAV file
    Render {
        /// JSON config file, or - for stdin
        config: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Length of each note in milliseconds
        #[arg(long, default_value = "300", value_parser = parse_duration)]
        note_length: Duration,

        /// Sample rate of the WAV file
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },
}

fn read_config(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading config from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing '{}' as JSON", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let engine = Engine::new();

    match args.command {
        Commands::Scale { config } => {
            let scale = engine.build_scale(&read_config(&config)?)?;
            println!("{}", serde_json::to_string(&scale)?);
        }
        Commands::Freq { config } => {
            let freq = engine.frequency(&read_config(&config)?)?;
            println!("{}", freq);
        }
        Commands::Augment { config } => {
            let augmented = engine.augment(&read_config(&config)?)?;
            println!("{}", serde_json::to_string(&augmented)?);
        }
        Commands::Octaves { config } => {
            let config = match config {
                Some(path) => read_config(&path)?,
                None => Value::Null,
            };
            let octaves = engine.octave_scale(&config)?;
            println!("{}", serde_json::to_string(&octaves)?);
        }
        Commands::Notes => {
            println!("{}", CHROMATIC_SCALE.join(" "));
        }
        Commands::Render {
            config,
            output,
            note_length,
            sample_rate,
        } => {
            let scale = engine.build_scale(&read_config(&config)?)?;
            log::info!(
                "rendering {} notes of {} ms at {} Hz",
                scale.len(),
                note_length.as_millis(),
                sample_rate
            );
            let wav_data = tones_to_wav(&scale, sample_rate, note_length)?;
            std::fs::write(&output, wav_data)
                .with_context(|| format!("writing '{}'", output.display()))?;
        }
    }

    Ok(())
}
