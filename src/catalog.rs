// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Static firmware catalog
//!
//! Every supported controller firmware ships a DAQPRJ template describing
//! the position of each value in a telemetry line. Templates are embedded
//! at build time and never fetched at runtime.
//!
//! Adding a firmware version means dropping its template next to this file
//! and registering it in [`TEMPLATES`].

mod descriptions;

use descriptions::DESCRIPTIONS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Firmware used when the configured version is not in the catalog
pub const DEFAULT_FIRMWARE: &str = "V14_1HAR_q1";

/// Registered templates, keyed by firmware version string
///
/// The default firmware comes first.
static TEMPLATES: &[(&str, &str)] = &[
    ("V14_1HAR_q1", include_str!("catalog/V14_1HAR_q1.xml")),
    ("V14_0HAR_q", include_str!("catalog/V14_0HAR_q.xml")),
];

/// Language used for parameter descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English labels
    #[default]
    En,
    /// German labels
    De,
}

impl Language {
    /// Short lowercase code
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

/// Template text for a firmware version
pub fn template(version: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(name, _)| *name == version)
        .map(|(_, text)| *text)
}

/// Template of [`DEFAULT_FIRMWARE`]
pub fn default_template() -> &'static str {
    // DEFAULT_FIRMWARE is the first catalog entry
    TEMPLATES[0].1
}

/// All firmware versions in the catalog
pub fn versions() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|(name, _)| *name)
}

/// Check whether a firmware version is in the catalog
pub fn is_supported(version: &str) -> bool {
    template(version).is_some()
}

/// Human-readable label for a parameter
pub fn description(name: &str, language: Language) -> Option<&'static str> {
    DESCRIPTIONS
        .binary_search_by(|(key, _, _)| (*key).cmp(name))
        .ok()
        .map(|idx| {
            let (_, en, de) = DESCRIPTIONS[idx];
            match language {
                Language::En => en,
                Language::De => de,
            }
        })
}

/// Names of all parameters that carry a description
pub fn described_parameters() -> impl Iterator<Item = &'static str> {
    DESCRIPTIONS.iter().map(|(name, _, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_firmware_registered() {
        assert!(is_supported(DEFAULT_FIRMWARE));
        assert_eq!(template(DEFAULT_FIRMWARE), Some(default_template()));
    }

    #[test]
    fn test_older_firmware_registered() {
        assert!(is_supported("V14_0HAR_q"));
        assert_ne!(template("V14_0HAR_q"), Some(default_template()));
        assert_eq!(versions().collect::<Vec<_>>(), ["V14_1HAR_q1", "V14_0HAR_q"]);
    }

    #[test]
    fn test_unknown_firmware() {
        assert!(template("V99_NOPE").is_none());
        assert!(!is_supported(""));
    }

    #[test]
    fn test_descriptions_sorted() {
        for pair in DESCRIPTIONS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_description_lookup() {
        assert_eq!(description("TK", Language::En), Some("Boiler Temperature"));
        assert_eq!(description("TK", Language::De), Some("Kesseltemperatur"));
        assert_eq!(description("does-not-exist", Language::En), None);
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("DE".parse::<Language>(), Ok(Language::De));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }
}
