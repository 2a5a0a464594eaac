use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use triage::{MetricReading, Protocol, TriageSession, WindowMonths};

#[derive(Debug, Parser)]
#[command(
    name = "triage",
    version,
    about = "Evaluate symptom-triage protocols from the command line",
    long_about = "triage evaluates declarative symptom-triage protocols.\n\n\
        A protocol file describes one presenting symptom: the catalog of\n\
        clinical findings (flags), an optional weight-loss metric, and an\n\
        ordered rule table evaluated first-match-wins.\n\n\
        EXAMPLES:\n\
        \n  triage validate demos/weight_loss.json          Check a protocol file\n\
        \n  triage check demos/weight_loss.json -f night_sweats   Evaluate with one flag set\n\
        \n  triage check demos/weight_loss.json --baseline 60 --current 56 --json\n\
        \n  cat protocol.json | triage validate -            Validate from stdin"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a protocol against a set of findings
    #[command(
        about = "Evaluate a protocol and print the disposition",
        long_about = "Loads a protocol file, applies the given flags and weight\n\
            readings, and prints the resulting disposition. Use `-` to read\n\
            the protocol from stdin."
    )]
    Check(CheckArgs),

    /// Validate a protocol file without evaluating it
    #[command(about = "Run construction-time validation on a protocol file")]
    Validate {
        /// Protocol JSON file, or `-` for stdin
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Protocol JSON file, or `-` for stdin
    file: PathBuf,

    /// Flag id to set; repeatable
    #[arg(short = 'f', long = "flag", value_name = "ID")]
    flags: Vec<String>,

    /// Baseline weight in kg (weight-metric protocols only)
    #[arg(long, value_name = "KG")]
    baseline: Option<f64>,

    /// Current weight in kg (weight-metric protocols only)
    #[arg(long, value_name = "KG")]
    current: Option<f64>,

    /// Look-back window in months
    #[arg(long, value_parser = parse_window, value_name = "6|12")]
    window: Option<WindowMonths>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_window(s: &str) -> Result<WindowMonths, String> {
    match s {
        "6" => Ok(WindowMonths::Six),
        "12" => Ok(WindowMonths::Twelve),
        other => Err(format!("invalid window `{other}`; expected 6 or 12")),
    }
}

/// JSON shape of `triage check --json`.
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    protocol: &'a str,
    tone: String,
    title: &'a str,
    bullets: &'a [String],
    active_flags: Vec<&'a str>,
    metric: Option<MetricReading>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Validate { file } => run_validate(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_protocol(path: &PathBuf) -> Result<Protocol, Box<dyn std::error::Error>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    Ok(Protocol::from_json(&text)?)
}

fn run_validate(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let protocol = read_protocol(path)?;
    let name = protocol.name.clone();
    let session = protocol.into_session()?;
    println!(
        "ok: protocol `{}` ({} flags, weight metric: {})",
        name,
        session.registry().len(),
        if session.metric().is_some() { "yes" } else { "no" },
    );
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let protocol = read_protocol(&args.file)?;
    let name = protocol.name.clone();
    let mut session = protocol.into_session()?;

    for id in &args.flags {
        session.toggle(id);
    }
    if let Some(kg) = args.baseline {
        session.set_baseline(kg);
    }
    if let Some(kg) = args.current {
        session.set_current(kg);
    }
    if let Some(window) = args.window {
        session.set_window(window);
    }

    if args.json {
        print_json(&name, &session)?;
    } else {
        print_text(&name, &session);
    }
    Ok(())
}

fn print_json(name: &str, session: &TriageSession) -> Result<(), Box<dyn std::error::Error>> {
    let disposition = session.disposition();
    let report = CheckReport {
        protocol: name,
        tone: disposition.tone.to_string(),
        title: &disposition.title,
        bullets: &disposition.bullets,
        active_flags: session.active_flags().iter().map(|f| f.id.as_str()).collect(),
        metric: session.metric(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(name: &str, session: &TriageSession) {
    let disposition = session.disposition();
    println!("{name}");
    println!("[{}] {}", disposition.tone, disposition.title);
    for bullet in &disposition.bullets {
        println!("  - {bullet}");
    }

    let active = session.active_flags();
    if active.is_empty() {
        println!("findings: none");
    } else {
        println!("findings:");
        for flag in active {
            println!("  [x] {}", flag.label);
        }
    }

    if let Some(reading) = session.metric() {
        println!(
            "weight loss: {:.1}% over {} months ({:?})",
            reading.percent_loss,
            reading.window.months(),
            reading.severity,
        );
    }
}
