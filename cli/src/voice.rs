//! Voice shortcut layer. Speech capture is an external capability; this
//! module maps an already-transcribed phrase onto an app action.

/// An action a spoken phrase can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Export,
    Backup,
    Stats,
    Statistics,
}

/// Keyword table in match priority order. Matching is by substring and the
/// first hit wins, so "show breakfast stats" triggers Breakfast. The order
/// is part of the contract; reordering changes what ambiguous phrases do.
pub const KEYWORDS: [(&str, VoiceCommand); 8] = [
    ("breakfast", VoiceCommand::Breakfast),
    ("lunch", VoiceCommand::Lunch),
    ("dinner", VoiceCommand::Dinner),
    ("snack", VoiceCommand::Snack),
    ("export", VoiceCommand::Export),
    ("backup", VoiceCommand::Backup),
    ("stats", VoiceCommand::Stats),
    ("statistics", VoiceCommand::Statistics),
];

impl VoiceCommand {
    #[must_use]
    pub fn parse(transcript: &str) -> Option<VoiceCommand> {
        let transcript = transcript.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| transcript.contains(keyword))
            .map(|&(_, command)| command)
    }
}

pub const UNRECOGNIZED_HELP: &str = "Command not recognized. Try saying:\n  \
    \"mark breakfast done\"\n  \
    \"mark lunch done\"\n  \
    \"export data\"\n  \
    \"show stats\"";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meal_phrases() {
        assert_eq!(
            VoiceCommand::parse("mark breakfast done"),
            Some(VoiceCommand::Breakfast)
        );
        assert_eq!(
            VoiceCommand::parse("I had my lunch"),
            Some(VoiceCommand::Lunch)
        );
        assert_eq!(VoiceCommand::parse("DINNER"), Some(VoiceCommand::Dinner));
        // "snack" also matches the plural.
        assert_eq!(
            VoiceCommand::parse("log my snacks"),
            Some(VoiceCommand::Snack)
        );
    }

    #[test]
    fn test_parse_data_and_stats_phrases() {
        assert_eq!(
            VoiceCommand::parse("export my data"),
            Some(VoiceCommand::Export)
        );
        assert_eq!(
            VoiceCommand::parse("create a backup"),
            Some(VoiceCommand::Backup)
        );
        assert_eq!(
            VoiceCommand::parse("show stats"),
            Some(VoiceCommand::Stats)
        );
    }

    #[test]
    fn test_first_keyword_wins() {
        // "breakfast" is checked before "stats".
        assert_eq!(
            VoiceCommand::parse("breakfast stats"),
            Some(VoiceCommand::Breakfast)
        );
        // "stats" is a substring of "statistics", so the Stats arm wins.
        assert_eq!(
            VoiceCommand::parse("show statistics"),
            Some(VoiceCommand::Stats)
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(VoiceCommand::parse("make me a sandwich"), None);
        assert_eq!(VoiceCommand::parse(""), None);
    }
}
