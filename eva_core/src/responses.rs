//! Canned response fragments.
//!
//! The engine picks from these; hosts never build response text themselves.

use crate::Emotion;

pub const SAD: &str = "I sense you might be feeling down. Would you like to listen to your favorite song or call a family member?";
pub const ANXIOUS: &str = "You seem a little anxious. Let's take a few slow, deep breaths together. Would you like me to play something calming?";
pub const HAPPY: &str = "It's wonderful to see you in good spirits! How can I assist you today?";
pub const NEUTRAL: &str = "Hello! How can I assist you today?";

pub const INACTIVE_DISTRESS: &str = "You have been inactive for a while. Would you like to take a short walk or some stretching?";
pub const INACTIVE_REMINDER: &str = "I noticed you haven't moved much recently. Remember to stay active for your health!";

pub const MEDICATION: &str = "Have you taken your medication today? Please don't forget your daily dose.";
pub const HYDRATION: &str = "Remember to drink some water. Try to have at least 4 glasses today.";
pub const STEPS: &str = "Let's aim for at least 2000 steps today. A gentle walk would do you good.";

/// Greeting fragment for the reported emotion
pub fn emotion_fragment(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Sad => SAD,
        Emotion::Anxious => ANXIOUS,
        Emotion::Happy => HAPPY,
        Emotion::Neutral => NEUTRAL,
    }
}

/// Critical alert text for a given inactivity streak
pub fn critical_alert(inactive_hours: u32) -> String {
    let unit = if inactive_hours == 1 { "hour" } else { "hours" };
    format!(
        "ALERT: Inactivity and emotional distress detected (inactive for {} {}). Contacting family...",
        inactive_hours, unit
    )
}

/// Echo of what the user said
pub fn echo_fragment(utterance: &str) -> String {
    format!("You said: \"{}\". I'm here to listen.", utterance)
}
