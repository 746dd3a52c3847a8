mod input;

use clap::{Parser, Subcommand};
use eva_core::config::DisplayConfig;
use eva_core::*;
use input::{Command, Widgets};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eva")]
#[command(about = "Emotion-aware voice assistant simulation for elder wellness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the inactivity threshold in hours (1-6)
    #[arg(long, global = true)]
    threshold: Option<u32>,

    /// Default log level (RUST_LOG still takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session reading one observation per line (default)
    Chat,

    /// Submit a single observation, optionally pressing the button several times
    Once {
        /// Emotion state (neutral, happy, sad, anxious)
        #[arg(long, default_value = "neutral")]
        emotion: Emotion,

        /// Activity state (active, inactive)
        #[arg(long, default_value = "active")]
        activity: Activity,

        /// Medication has been taken today
        #[arg(long)]
        meds: bool,

        /// Glasses of water so far today
        #[arg(long, default_value_t = 0)]
        water: u32,

        /// Steps so far today
        #[arg(long, default_value_t = 0)]
        steps: u32,

        /// What the user says
        #[arg(long)]
        say: Option<String>,

        /// Number of consecutive submissions
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: u32,

        /// Print the final payload and state as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    eva_core::logging::init(&cli.log_level);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(threshold) = cli.threshold {
        config.engine.inactivity_threshold_hours = threshold;
    }
    config.validate()?;

    match cli.command {
        Some(Commands::Once {
            emotion,
            activity,
            meds,
            water,
            steps,
            say,
            repeat,
            json,
        }) => {
            let widgets = Widgets {
                emotion,
                activity,
                health: HealthInputs {
                    medication_taken: meds,
                    water_intake: water,
                    daily_steps: steps,
                },
            };
            cmd_once(&config, &widgets, say, repeat, json)
        }
        Some(Commands::Chat) | None => cmd_chat(&config),
    }
}

/// JSON view of a finished run
#[derive(Serialize)]
struct Report<'a> {
    payload: &'a ResponsePayload,
    metrics: SessionMetrics,
    state: &'a SessionState,
}

fn cmd_once(
    config: &Config,
    widgets: &Widgets,
    say: Option<String>,
    repeat: u32,
    json: bool,
) -> Result<()> {
    let observation = widgets.observation(say, config.engine.inactivity_threshold_hours);
    let mut session = Session::new();

    let mut payload = session.interact(&observation);
    for _ in 1..repeat {
        payload = session.interact(&observation);
    }

    if json {
        let report = Report {
            payload: &payload,
            metrics: session.metrics(),
            state: session.state(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_payload(&payload);
        display_metrics(&session);
        display_history(&session, &config.display);
    }

    Ok(())
}

fn cmd_chat(config: &Config) -> Result<()> {
    let threshold = config.engine.inactivity_threshold_hours;
    let mut session = Session::new();
    let mut widgets = Widgets::default();

    println!("EVA Simulation: Emotion-Aware Voice Assistant for Elder Wellness and Safety");
    println!("Inactivity alert threshold: {} hours", threshold);
    display_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match input::parse_line(&line, &mut widgets) {
            Ok(Command::Submit { utterance }) => {
                let payload = session.interact(&widgets.observation(utterance, threshold));
                display_payload(&payload);
                display_metrics(&session);
            }
            Ok(Command::ResetTimer) => {
                session.reset_timer();
                println!("✓ Inactivity timer reset");
            }
            Ok(Command::ClearAll) => {
                session.clear_all();
                println!("✓ Session cleared");
            }
            Ok(Command::History) => display_history(&session, &config.display),
            Ok(Command::Metrics) => display_metrics(&session),
            Ok(Command::Help) => display_help(),
            Ok(Command::Quit) => break,
            Err(e) => eprintln!("{}", e),
        }
    }

    tracing::debug!(
        "Session ended after {} interactions",
        session.state().interaction_count
    );
    Ok(())
}

fn display_help() {
    println!("─────────────────────────────────────────");
    println!("Set widgets with key=value, then Enter to submit:");
    println!("  emotion=neutral|happy|sad|anxious  activity=active|inactive");
    println!("  meds=yes|no  water=<glasses>  steps=<count>");
    println!("  append '-- <text>' to say something");
    println!("  'r' reset timer, 'c' clear all, 'h' history, 'm' metrics, 'q' quit");
}

fn display_payload(payload: &ResponsePayload) {
    println!();
    println!("EVA Response");
    println!("────────────");
    println!("{}", payload.response_text);

    if let Some(ref alert) = payload.alert {
        println!();
        println!("Family Alert");
        println!("────────────");
        println!("{}", alert);
    }
    println!();
}

fn display_metrics(session: &Session) {
    let metrics = session.metrics();
    println!(
        "Wellness: {}/100 | Interactions: {} | Inactive hours: {} | Alerts: {}",
        metrics.wellness_score,
        metrics.interaction_count,
        metrics.inactive_hours,
        metrics.alert_count
    );
}

fn display_history(session: &Session, display: &DisplayConfig) {
    let recent = session.recent_alerts(display.alert_history_limit);
    if recent.is_empty() {
        println!("No alerts recorded.");
        return;
    }

    println!("Alert History (last {})", recent.len());
    let mut rows: Vec<&AlertRecord> = recent.iter().collect();
    if display.newest_first {
        rows.reverse();
    }
    for record in rows {
        let marker = match record.severity {
            Severity::High => "🔴",
            Severity::Low => "🟡",
        };
        println!(
            "  {} {} {}",
            marker,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.message
        );
    }
}
