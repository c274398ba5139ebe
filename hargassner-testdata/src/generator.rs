// Hargassner Testdata - Telemetry line generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Synthetic `pm` lines shaped by a compiled schema.
//!
//! Every generated line carries exactly `expected_token_count` tokens.
//! Well-known parameters get realistic ranges, `ZK` follows the requested
//! [`BoilerPhase`], and digital slots only set bits the schema defines.

use hargassner::boiler::{BoilerState, FAULT_CODE_PARAMETER, FAULT_PARAMETER, STATE_PARAMETER};
use hargassner::{ChannelKind, Language, ParameterDefinition, Schema, SchemaCompiler, SchemaError};
use hargassner::catalog;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors creating a generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Firmware is not in the catalog
    #[error("Unknown firmware: {0}")]
    UnknownFirmware(String),

    /// Catalog template did not compile
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Coarse boiler phase driving the `ZK` state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoilerPhase {
    /// Boiler switched off
    Off,
    /// Start-up and ignition
    Starting,
    /// Full firing
    Running,
    /// Ember preservation
    Cooling,
}

impl BoilerPhase {
    /// Phase mix used when phases vary, weighted towards running.
    pub const WEIGHTED: [BoilerPhase; 5] = [
        Self::Running,
        Self::Running,
        Self::Running,
        Self::Starting,
        Self::Off,
    ];

    /// Pick a `ZK` state for this phase.
    pub fn state<R: Rng + ?Sized>(&self, rng: &mut R) -> BoilerState {
        match self {
            Self::Off => BoilerState::Off,
            Self::Starting => BoilerState::from_code(rng.gen_range(2..=6))
                .unwrap_or(BoilerState::PreparingStart),
            Self::Running => BoilerState::FullFiring,
            Self::Cooling => BoilerState::EmberPreservation,
        }
    }

    /// Check if the burner produces heat in this phase.
    pub fn is_burning(&self) -> bool {
        matches!(self, Self::Running | Self::Starting)
    }
}

impl std::str::FromStr for BoilerPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "starting" => Ok(Self::Starting),
            "running" => Ok(Self::Running),
            "cooling" => Ok(Self::Cooling),
            other => Err(format!("unknown phase '{}'", other)),
        }
    }
}

/// Realistic ranges for common parameters (min, max).
const VALUE_RANGES: &[(&str, f64, f64)] = &[
    ("O2", 0.0, 21.0),
    ("TK", 20.0, 90.0),
    ("TKsoll", 50.0, 85.0),
    ("TRL", 20.0, 70.0),
    ("TRG", 50.0, 250.0),
    ("SZist", 0.0, 100.0),
    ("SZsoll", 0.0, 100.0),
    ("TPo", 20.0, 90.0),
    ("TPm", 20.0, 80.0),
    ("TPu", 20.0, 70.0),
    ("Leistung", 0.0, 100.0),
    ("ESsoll", 0.0, 100.0),
    ("Taus", -20.0, 40.0),
    ("Lagerstand", 0.0, 5000.0),
    ("Verbrauchszähler", 0.0, 50000.0),
];

/// Fault code injected together with the fault flag.
const INJECTED_FAULT_CODE: i64 = 5;

/// Generates telemetry lines for one schema.
#[derive(Debug)]
pub struct MessageGenerator {
    schema: Arc<Schema>,
    rng: StdRng,
    noise_std: f64,
    fault_probability: f64,
    digital_masks: BTreeMap<usize, u32>,
}

impl MessageGenerator {
    /// Create a generator seeded from entropy.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_rng(schema, StdRng::from_entropy())
    }

    /// Create a reproducible generator.
    pub fn with_seed(schema: Arc<Schema>, seed: u64) -> Self {
        Self::with_rng(schema, StdRng::seed_from_u64(seed))
    }

    /// Create a generator for a catalog firmware.
    pub fn for_firmware(version: &str, seed: Option<u64>) -> Result<Self, GeneratorError> {
        if !catalog::is_supported(version) {
            return Err(GeneratorError::UnknownFirmware(version.to_string()));
        }
        let schema = Arc::new(SchemaCompiler::new(Language::En).for_firmware(version)?);
        Ok(match seed {
            Some(seed) => Self::with_seed(schema, seed),
            None => Self::new(schema),
        })
    }

    fn with_rng(schema: Arc<Schema>, rng: StdRng) -> Self {
        let mut digital_masks = BTreeMap::new();
        for def in schema.digital() {
            if let ChannelKind::Digital { bit_mask } = def.kind {
                *digital_masks.entry(def.slot_index).or_insert(0) |= bit_mask;
            }
        }

        Self {
            schema,
            rng,
            noise_std: 0.5,
            fault_probability: 0.0,
            digital_masks,
        }
    }

    /// Set the standard deviation of the jitter added to analog values.
    pub fn with_noise(mut self, std_dev: f64) -> Self {
        if std_dev.is_finite() {
            self.noise_std = std_dev.abs();
        }
        self
    }

    /// Probability (0-1) that a line reports a boiler fault.
    pub fn with_fault_probability(mut self, probability: f64) -> Self {
        self.fault_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Schema lines are generated for.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Pick a phase from the weighted mix.
    pub fn random_phase(&mut self) -> BoilerPhase {
        BoilerPhase::WEIGHTED[self.rng.gen_range(0..BoilerPhase::WEIGHTED.len())]
    }

    /// Generate one line.
    pub fn generate(&mut self, phase: BoilerPhase) -> String {
        let mut tokens = vec!["0".to_string(); self.schema.expected_token_count()];
        let faulted = self.rng.gen_bool(self.fault_probability);

        let analog: Vec<ParameterDefinition> = self.schema.analog().cloned().collect();
        for def in &analog {
            let token = match def.name.as_str() {
                STATE_PARAMETER => phase.state(&mut self.rng).code().to_string(),
                FAULT_CODE_PARAMETER if faulted => INJECTED_FAULT_CODE.to_string(),
                FAULT_CODE_PARAMETER => "0".to_string(),
                _ => self.analog_value(def, phase),
            };
            if let Some(slot) = tokens.get_mut(def.slot_index) {
                *slot = token;
            }
        }

        let fault_bits = self.fault_bits();
        for (&slot, &mask) in &self.digital_masks {
            let fault_mask = fault_bits.get(&slot).copied().unwrap_or(0);
            let mut packed = self.rng.gen::<u32>() & mask & !fault_mask;
            if faulted {
                packed |= fault_mask;
            }
            if let Some(token) = tokens.get_mut(slot) {
                *token = packed.to_string();
            }
        }

        format!("pm {}", tokens.join(" "))
    }

    /// Generate `count` lines, optionally varying the phase.
    pub fn generate_many(&mut self, count: usize, vary_phase: bool) -> Vec<String> {
        (0..count)
            .map(|_| {
                let phase = if vary_phase {
                    self.random_phase()
                } else {
                    BoilerPhase::Running
                };
                self.generate(phase)
            })
            .collect()
    }

    fn analog_value(&mut self, def: &ParameterDefinition, phase: BoilerPhase) -> String {
        let range = VALUE_RANGES
            .iter()
            .find(|(name, _, _)| *name == def.name)
            .map(|(_, min, max)| (*min, *max));

        let (min, max) = match (range, def.unit()) {
            (Some(range), _) => range,
            (None, Some("°C")) => (20.0, 80.0),
            (None, Some("%")) => (0.0, 100.0),
            (None, Some(_)) => (0.0, 100.0),
            // Unitless channels are counters or codes
            (None, None) => return self.rng.gen_range(0..100).to_string(),
        };

        let (min, max) = if phase.is_burning() {
            (min, max)
        } else {
            // Idle boiler: lower third of the range
            (min, min + (max - min) / 3.0)
        };
        let jitter: f64 = self.rng.sample(StandardNormal);
        let value = self.rng.gen_range(min..=max) + jitter * self.noise_std;
        format!("{:.1}", value.clamp(min, max))
    }

    fn fault_bits(&self) -> BTreeMap<usize, u32> {
        let mut bits = BTreeMap::new();
        if let Some(def) = self.schema.get(FAULT_PARAMETER) {
            if let ChannelKind::Digital { bit_mask } = def.kind {
                bits.insert(def.slot_index, bit_mask);
            }
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hargassner::{LineDecoder, Value, DEFAULT_FIRMWARE};

    fn generator(seed: u64) -> MessageGenerator {
        MessageGenerator::for_firmware(DEFAULT_FIRMWARE, Some(seed)).unwrap()
    }

    #[test]
    fn test_lines_have_expected_token_count() {
        let mut gen = generator(42);
        let expected = gen.schema().expected_token_count();
        for line in gen.generate_many(20, true) {
            assert!(line.starts_with("pm "));
            assert_eq!(line.split_whitespace().count() - 1, expected);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(
            generator(7).generate_many(5, true),
            generator(7).generate_many(5, true)
        );
    }

    #[test]
    fn test_phase_drives_state() {
        let mut gen = generator(1);
        let decoder = LineDecoder::new(Arc::clone(gen.schema()));

        let running = decoder.decode(&gen.generate(BoilerPhase::Running)).unwrap();
        assert_eq!(running.value("ZK"), Some(Value::Integer(7)));

        let off = decoder.decode(&gen.generate(BoilerPhase::Off)).unwrap();
        assert_eq!(off.value("ZK"), Some(Value::Integer(1)));

        for _ in 0..20 {
            let starting = decoder.decode(&gen.generate(BoilerPhase::Starting)).unwrap();
            let zk = starting.value("ZK").unwrap().as_i64().unwrap();
            assert!((2..=6).contains(&zk));
        }
    }

    #[test]
    fn test_fault_injection() {
        let mut gen = generator(3).with_fault_probability(1.0);
        let decoder = LineDecoder::new(Arc::clone(gen.schema()));
        let sample = decoder.decode(&gen.generate(BoilerPhase::Running)).unwrap();
        assert_eq!(sample.value(FAULT_PARAMETER), Some(Value::Bool(true)));
        assert_eq!(sample.value(FAULT_CODE_PARAMETER), Some(Value::Integer(5)));

        let mut gen = generator(3);
        let sample = decoder.decode(&gen.generate(BoilerPhase::Running)).unwrap();
        assert_eq!(sample.value(FAULT_PARAMETER), Some(Value::Bool(false)));
    }

    #[test]
    fn test_known_ranges_respected() {
        let mut gen = generator(9);
        let decoder = LineDecoder::new(Arc::clone(gen.schema()));
        for _ in 0..50 {
            let sample = decoder.decode(&gen.generate(BoilerPhase::Running)).unwrap();
            let o2 = sample.value("O2").unwrap().as_f64();
            assert!((0.0..=21.0).contains(&o2), "O2 = {}", o2);
        }
    }

    #[test]
    fn test_unknown_firmware() {
        assert!(matches!(
            MessageGenerator::for_firmware("V0_NOPE", None),
            Err(GeneratorError::UnknownFirmware(_))
        ));
    }

    #[test]
    fn test_phase_from_str() {
        assert_eq!("Running".parse::<BoilerPhase>(), Ok(BoilerPhase::Running));
        assert!("boiling".parse::<BoilerPhase>().is_err());
    }
}
