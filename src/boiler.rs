// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Boiler domain helpers on top of decoded samples

use crate::catalog::Language;
use crate::decoder::DecodedSample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameter carrying the boiler state code
pub const STATE_PARAMETER: &str = "ZK";
/// Digital fault flag
pub const FAULT_PARAMETER: &str = "Störung";
/// Analog fault code
pub const FAULT_CODE_PARAMETER: &str = "Störungs Nr";
/// Pellet consumption counter in kg
pub const CONSUMPTION_PARAMETER: &str = "Verbrauchszähler";

/// Energy content of wood pellets (kWh per kg)
pub const PELLET_ENERGY_FACTOR: f64 = 4.8;

/// Operating state reported in `ZK`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoilerState {
    Unknown = 0,
    Off = 1,
    PreparingStart = 2,
    BoilerStart = 3,
    MonitoringIgnition = 4,
    Ignition = 5,
    TransitionToFullFiring = 6,
    FullFiring = 7,
    EmberPreservation = 8,
    WaitingForAshRemoval = 9,
    AshRemoval = 10,
    Reserved = 11,
    Cleaning = 12,
}

impl BoilerState {
    /// All states in code order
    pub const ALL: [BoilerState; 13] = [
        Self::Unknown,
        Self::Off,
        Self::PreparingStart,
        Self::BoilerStart,
        Self::MonitoringIgnition,
        Self::Ignition,
        Self::TransitionToFullFiring,
        Self::FullFiring,
        Self::EmberPreservation,
        Self::WaitingForAshRemoval,
        Self::AshRemoval,
        Self::Reserved,
        Self::Cleaning,
    ];

    /// State for a raw `ZK` code
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// State reported in a sample; out-of-range codes map to `Unknown`
    pub fn from_sample(sample: &DecodedSample) -> Option<Self> {
        let code = sample.value(STATE_PARAMETER)?.as_f64() as i64;
        Some(Self::from_code(code).unwrap_or(Self::Unknown))
    }

    /// Raw `ZK` code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Display label
    pub fn label(&self, language: Language) -> &'static str {
        let idx = *self as usize;
        match language {
            Language::En => STATES_EN[idx],
            Language::De => STATES_DE[idx],
        }
    }

    /// Check if the burner is firing
    pub fn is_firing(&self) -> bool {
        matches!(self, Self::TransitionToFullFiring | Self::FullFiring)
    }
}

impl fmt::Display for BoilerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::En))
    }
}

const STATES_EN: [&str; 13] = [
    "Unknown",
    "Off",
    "Preparing start",
    "Boiler start",
    "Monitoring ignition",
    "Ignition",
    "Transition to FF",
    "Full firing",
    "Ember preservation",
    "Waiting for AR",
    "Ash removal",
    "-",
    "Cleaning",
];

const STATES_DE: [&str; 13] = [
    "Unbekannt",
    "Aus",
    "Startvorbereitung",
    "Kessel Start",
    "Zündüberwachung",
    "Zündung",
    "Übergang LB",
    "Leistungsbrand",
    "Gluterhaltung",
    "Warten auf EA",
    "Entaschung",
    "-",
    "Putzen",
];

/// Known fault codes (code, English, German)
const ERROR_CODES: &[(u32, &str, &str)] = &[
    (5, "Empty ash drawer", "Aschelade entleeren"),
    (6, "Ash drawer too full", "Aschelade zu voll"),
    (29, "Combustion fault", "Verbrennungsstörung"),
    (30, "Battery empty", "Batterie leer"),
    (31, "Feed motor blocked", "Blockade Einschubmotor"),
    (32, "Fill time exceeded", "Füllzeit überschritten"),
    (70, "Pellet stock low", "Pelletslagerstand niedrig"),
    (89, "Grate stiff", "Schieberost schwergängig"),
    (93, "Ash drawer open", "Aschelade offen"),
    (155, "Cleaning defective", "Spülung defekt"),
    (227, "Storage room switch off", "Lagerraumschalter aus"),
    (228, "Pellet container almost empty", "Pelletsbehälter fast leer"),
    (229, "Check level indicator", "Füllstandsmelder kontrollieren"),
    (371, "Check combustion chamber", "Brennraum prüfen"),
];

/// Text for a known fault code
pub fn error_text(code: u32, language: Language) -> Option<&'static str> {
    ERROR_CODES
        .iter()
        .find(|(known, _, _)| *known == code)
        .map(|(_, en, de)| match language {
            Language::En => *en,
            Language::De => *de,
        })
}

/// Operation status text: `OK`, the fault text, or `Error <code>`
pub fn operation_status(sample: &DecodedSample, language: Language) -> String {
    let faulted = sample
        .value(FAULT_PARAMETER)
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !faulted {
        return "OK".to_string();
    }

    match sample.value(FAULT_CODE_PARAMETER) {
        Some(value) => {
            let code = value.as_f64() as u32;
            error_text(code, language)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Error {}", code))
        }
        None => "Error".to_string(),
    }
}

/// Thermal energy of burnt pellets
pub fn pellet_energy_kwh(kg: f64) -> f64 {
    kg * PELLET_ENERGY_FACTOR
}

/// Energy equivalent of the consumption counter, if present
pub fn consumed_energy_kwh(sample: &DecodedSample) -> Option<f64> {
    sample
        .value(CONSUMPTION_PARAMETER)
        .map(|v| pellet_energy_kwh(v.as_f64()))
}
