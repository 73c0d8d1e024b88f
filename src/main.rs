//! rect-align CLI
//!
//! Usage:
//!   rect-align --scene <FILE> [OPTIONS] [SCRIPT]
//!
//! Options:
//!   -s, --scene <FILE>   Scene to align (TOML format)
//!   -o, --output <FILE>  Write the aligned scene back as TOML
//!   -f, --format <FMT>   Report format: text or json
//!   --exclude-border     Keep element borders outside canvas edges
//!   --no-node            Leave element ids out of the reports
//!   -v, --verbose        More log output (repeatable)
//!   -g, --grammar        Show script grammar reference
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use rect_align::script::describe;
use rect_align::{
    run_with_config, BorderMode, CommandReport, HandlerRegistry, RunConfig, RunError, Scene,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "rect-align")]
#[command(about = "Align and distribute rectangles in a scene")]
struct Cli {
    /// Script file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Scene file with the elements to align (TOML format)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Write the aligned scene to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Subtract each element's border on the aligned edge in canvas commands
    #[arg(long)]
    exclude_border: bool,

    /// Omit element ids from position-change records
    #[arg(long)]
    no_node: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show script grammar reference
    #[arg(short, long)]
    grammar: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle documentation flags first
    if cli.grammar {
        print_grammar();
        return;
    }

    let Some(scene_path) = &cli.scene else {
        print_intro();
        std::process::exit(2);
    };

    // If no script file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let mut scene = match Scene::from_file(scene_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading scene '{}': {}", scene_path.display(), e);
            std::process::exit(1);
        }
    };
    info!(
        scene = %scene_path.display(),
        elements = scene.elements.len(),
        "scene loaded"
    );

    // Read script
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = RunConfig::new();
    if cli.exclude_border {
        config = config.with_border(BorderMode::Exclude);
    }
    if cli.no_node {
        config = config.with_include_node(false);
    }

    let mut registry = HandlerRegistry::with_builtins();
    let reports = match run_with_config(&mut scene, &source, config, &mut registry) {
        Ok(reports) => reports,
        Err(e) => {
            report_error(&e, &source, &filename);
            std::process::exit(1);
        }
    };

    if let Err(e) = print_reports(&reports, cli.format) {
        eprintln!("Error writing report: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = &cli.output {
        if let Err(e) = scene.save(path) {
            eprintln!("Error writing scene '{}': {}", path.display(), e);
            std::process::exit(1);
        }
        info!(output = %path.display(), "scene written");
    }
}

/// Log to stderr, WARN by default; `-v` raises the level and RUST_LOG overrides
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn report_error(err: &RunError, source: &str, filename: &str) {
    let rendered = err.format(source, filename);
    if rendered.is_empty() {
        eprintln!("Error: {}", err);
    } else {
        eprint!("{}", rendered);
    }
}

fn print_reports(reports: &[CommandReport], format: Format) -> Result<(), serde_json::Error> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        Format::Text => {
            for report in reports {
                println!("{}", report.command);
                for record in &report.records {
                    println!("  {}", describe(record));
                }
            }
        }
    }
    Ok(())
}

fn print_intro() {
    println!(
        r#"rect-align - Align and distribute rectangles

USAGE:
    rect-align --scene <FILE> [OPTIONS] [SCRIPT]
    echo '<commands>' | rect-align --scene <FILE>

OPTIONS:
    -s, --scene <FILE>    Scene to align (TOML)
    -o, --output <FILE>   Write the aligned scene back as TOML
    -f, --format <FMT>    Report format: text (default) or json
    --exclude-border      Keep element borders outside canvas edges
    --no-node             Leave element ids out of the reports
    -v, --verbose         More log output (repeatable)
    -g, --grammar         Show script grammar reference
    -h, --help            Print help

QUICK START:
    echo 'align top .card' | rect-align --scene cards.toml -o cards.toml

Run --grammar for the script syntax."#
    );
}

fn print_grammar() {
    println!(
        r#"RECT-ALIGN SCRIPT GRAMMAR
=========================

COMMANDS
--------
align <kind> <selectors> [then <handler>]
    Align two or more elements to one another.

canvas <kind> <selectors> to <selector> [border: include|exclude] [then <handler>]
    Move one or more elements by a single distance so the set meets
    the canvas element. The canvas itself never moves.

distribute horizontal|vertical <selectors> gap <value> [then <handler>]
    Sort two or more elements along the axis and chain them with
    <value> between neighbours. The first element stays put.

KINDS
-----
top, bottom, left, right   Extreme edge of the set
center                     Horizontal center line
middle (or vertical)       Vertical middle line

SELECTORS
---------
#id        First element with this id
.class     Every element with this class
tag        Every element with this tag
a, b, c    Union, in scene order

GAP
---
A leading integer: 12, -4, 8px, "10". Anything else is an error.

HANDLERS
--------
log        Log every record at INFO level
print      Print every record to stdout

Comments: // line and /* block */. Commands may end with ';'."#
    );
}
