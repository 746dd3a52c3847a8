//! Line-based stand-in for the form widgets.
//!
//! A line is either a one-letter command or a set of `key=value` widget
//! updates, optionally followed by `-- <what the user says>`.

use eva_core::{Activity, Emotion, Error, HealthInputs, Observation, Result};

/// Current widget values; unset keys keep their previous value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Widgets {
    pub emotion: Emotion,
    pub activity: Activity,
    pub health: HealthInputs,
}

impl Widgets {
    pub fn observation(&self, utterance: Option<String>, threshold: u32) -> Observation {
        let mut observation = Observation::new(self.emotion, self.activity)
            .with_health(self.health)
            .with_threshold(threshold);
        observation.utterance = utterance;
        observation
    }
}

/// What a single input line asks the host to do
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Submit { utterance: Option<String> },
    ResetTimer,
    ClearAll,
    History,
    Metrics,
    Help,
    Quit,
}

/// Parse one line, applying any widget updates to `widgets`
///
/// Widgets are only modified when the whole line parses.
pub fn parse_line(line: &str, widgets: &mut Widgets) -> Result<Command> {
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "r" | "reset" => return Ok(Command::ResetTimer),
        "c" | "clear" => return Ok(Command::ClearAll),
        "h" | "history" => return Ok(Command::History),
        "m" | "metrics" => return Ok(Command::Metrics),
        "?" | "help" => return Ok(Command::Help),
        _ => {}
    }

    let (fields, utterance) = match line.split_once("--") {
        // Only the separator space goes; the rest is echoed as typed
        Some((fields, said)) => {
            let said = said.strip_prefix(' ').unwrap_or(said);
            (fields, Some(said.to_string()))
        }
        None => (line, None),
    };

    let mut updated = widgets.clone();
    for token in fields.split_whitespace() {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| Error::InvalidInput(format!("expected key=value, got '{}'", token)))?;

        match key.to_lowercase().as_str() {
            "emotion" => updated.emotion = value.parse()?,
            "activity" => updated.activity = value.parse()?,
            "meds" | "medication" => updated.health.medication_taken = parse_flag(value)?,
            "water" => updated.health.water_intake = parse_count(key, value)?,
            "steps" => updated.health.daily_steps = parse_count(key, value)?,
            other => {
                return Err(Error::InvalidInput(format!("unknown field '{}'", other)));
            }
        }
    }

    *widgets = updated;
    Ok(Command::Submit {
        utterance: utterance.filter(|said| !said.trim().is_empty()),
    })
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(Error::InvalidInput(format!("expected yes or no, got '{}'", value))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{} must be a non-negative number, got '{}'", key, value)))
}
