//! Language of prompts and user-facing messages.

use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Locale {
    #[default]
    German,
    English,
}

impl Locale {
    /// Instruction appended to every prompt.
    #[must_use]
    pub fn detail_instruction(self) -> &'static str {
        match self {
            Locale::German => {
                "Geben Sie Details zu Sauberkeit, Barrierefreiheit und Öffnungszeiten an, falls verfügbar."
            }
            Locale::English => {
                "Include details on cleanliness, accessibility and opening hours where available."
            }
        }
    }

    #[must_use]
    pub fn text_prompt(self, query: &str) -> String {
        let lead = match self {
            Locale::German => {
                format!("Finden Sie öffentliche Toiletten in der Nähe von \"{query}\".")
            }
            Locale::English => format!("Find public toilets near \"{query}\"."),
        };
        format!("{lead} {}", self.detail_instruction())
    }

    #[must_use]
    pub fn vicinity_prompt(self) -> String {
        let lead = match self {
            Locale::German => {
                "Finden Sie alle öffentlichen Toiletten in meiner unmittelbaren Nähe."
            }
            Locale::English => "Find all public toilets in my immediate vicinity.",
        };
        format!("{lead} {}", self.detail_instruction())
    }

    /// Summary substituted when the service returns no text.
    #[must_use]
    pub fn fallback_summary(self) -> &'static str {
        match self {
            Locale::German => "Ich konnte keine Informationen finden.",
            Locale::English => "I could not find any information.",
        }
    }

    #[must_use]
    pub fn service_unavailable_message(self, model: &str) -> String {
        match self {
            Locale::German => format!(
                "Der Dienst ist zur Zeit nicht verfügbar oder der Standort wird nicht unterstützt (Model: {model})."
            ),
            Locale::English => format!(
                "The service is currently unavailable or this location is not supported (model: {model})."
            ),
        }
    }

    #[must_use]
    pub fn search_failed_message(self) -> &'static str {
        match self {
            Locale::German => {
                "Fehler bei der Suche nach Toiletten. Bitte versuchen Sie es später erneut."
            }
            Locale::English => "Searching for toilets failed. Please try again later.",
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Locale::German => "de",
            Locale::English => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" | "de-de" | "german" => Ok(Locale::German),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::English),
            other => Err(format!("unsupported locale '{other}' (expected 'de' or 'en')")),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
