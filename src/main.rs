// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use chordprog::config::Settings;
use chordprog::engine::ProgressionRequest;
use chordprog::midi;
use chordprog::music::{progression, Scale};

fn print_usage() {
    println!("chordprog - Diatonic chord progressions as MIDI");
    println!();
    println!("Usage: chordprog [KEY] [NUM_CHORDS] [OPTIONS]");
    println!();
    println!("Arguments:");
    println!("  KEY                     Key such as \"C major\", \"F#m\", \"Bb minor\"");
    println!(
        "  NUM_CHORDS              Number of chords, {}-{} (default {})",
        progression::MIN_CHORDS,
        progression::MAX_CHORDS,
        progression::DEFAULT_CHORDS
    );
    println!();
    println!("Options:");
    println!("  --output <FILE>         Write the progression as a MIDI file");
    println!("  --config <FILE>         Load settings from a YAML file");
    println!("  --list-progressions     List the progression templates");
    println!("  --help                  Show this help message");
}

fn print_progressions() {
    for p in progression::all() {
        println!("{:>2} chords  {:<16} degrees {:?}", p.len(), p.label, p.degrees);
    }
}

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    key: Option<String>,
    num_chords: Option<i32>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--output requires a file path"))?;
                parsed.output = Some(PathBuf::from(path));
            }
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => {
                return Err(anyhow!("Unknown option: {}", other));
            }
            other if parsed.key.is_none() => {
                parsed.key = Some(other.to_string());
            }
            other if parsed.num_chords.is_none() => {
                let n = other
                    .parse()
                    .map_err(|_| anyhow!("Invalid chord count: {}", other))?;
                parsed.num_chords = Some(n);
            }
            other => {
                return Err(anyhow!("Unexpected argument: {}", other));
            }
        }
    }

    Ok(parsed)
}

fn run(args: Args) -> Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let request = ProgressionRequest::new(args.key.unwrap_or_else(|| settings.defaults.key.clone()))
        .with_num_chords(args.num_chords.unwrap_or(settings.defaults.num_chords));
    info!(key = %request.key, num_chords = request.num_chords, "generating progression");

    let result = request.generate()?;

    println!("{}", result);
    println!("  scale {}", Scale::new(*result.key()));
    for chord in result.chords() {
        println!("  {:<5} {}", chord.numeral(), chord);
    }

    if let Some(path) = &args.output {
        midi::write_progression(&result, &settings.output.render_options(), path)
            .with_context(|| format!("Failed to export {:?}", path))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("--help") | Some("-h") => {
            print_usage();
        }
        Some("--list-progressions") => {
            print_progressions();
        }
        Some(_) => {
            let parsed = match parse_args(&args) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    print_usage();
                    std::process::exit(1);
                }
            };
            run(parsed)?;
        }
    }

    Ok(())
}
