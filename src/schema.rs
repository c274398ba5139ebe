// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Firmware schema compilation
//!
//! A DAQPRJ template lists analog channels (one value per token) and digital
//! channels (single bits packed into shared integer tokens). Compilation
//! turns it into a name-keyed lookup table plus the expected line length.
//!
//! # Slot layout
//!
//! ```text
//! pm [analog 0] [analog 1] ... [analog N-1] [digital 0] ... [digital M-1]
//!     \___________ N = max analog id + 1 _/  \__ M = max digital id + 1 _/
//! ```
//!
//! Channel ids are authoritative; document order is irrelevant and gaps are
//! allowed. Ids above [`MAX_CHANNEL_ID`] are rejected.

use crate::catalog::{self, Language, DEFAULT_FIRMWARE};
use crate::error::SchemaError;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Highest accepted channel id, in either block
pub const MAX_CHANNEL_ID: usize = 4095;

/// Decode rule of a single parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelKind {
    /// Numeric value taken directly from its token
    Analog {
        /// Unit of measurement
        unit: Option<String>,
    },
    /// Boolean taken from one bit of a shared integer token
    Digital {
        /// Single-bit mask
        bit_mask: u32,
    },
}

/// Definition of a single parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefinition {
    /// Unique name within the schema
    pub name: String,
    /// Position in the value tokens of a line (marker excluded)
    pub slot_index: usize,
    /// Decode rule
    pub kind: ChannelKind,
    /// Human-readable label
    pub description: String,
}

impl ParameterDefinition {
    /// Unit of measurement (digital channels have none)
    pub fn unit(&self) -> Option<&str> {
        match &self.kind {
            ChannelKind::Analog { unit } => unit.as_deref(),
            ChannelKind::Digital { .. } => None,
        }
    }

    /// Check if this is a digital channel
    pub fn is_digital(&self) -> bool {
        matches!(self.kind, ChannelKind::Digital { .. })
    }

    /// Bit mask of a digital channel
    pub fn bit_mask(&self) -> Option<u32> {
        match self.kind {
            ChannelKind::Digital { bit_mask } => Some(bit_mask),
            ChannelKind::Analog { .. } => None,
        }
    }
}

/// Compiled, immutable parameter table of one firmware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    firmware: String,
    parameters: BTreeMap<String, ParameterDefinition>,
    analog_block: usize,
    digital_block: usize,
    overwritten: Vec<String>,
}

impl Schema {
    /// Firmware version (or template label) this schema was compiled from
    pub fn firmware(&self) -> &str {
        &self.firmware
    }

    /// Number of value tokens a complete line carries
    pub fn expected_token_count(&self) -> usize {
        self.analog_block + self.digital_block
    }

    /// Number of analog slots (max analog id + 1)
    pub fn analog_block_size(&self) -> usize {
        self.analog_block
    }

    /// Number of packed digital slots (max digital id + 1)
    pub fn digital_block_size(&self) -> usize {
        self.digital_block
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.get(name)
    }

    /// All parameters in name order
    pub fn parameters(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.parameters.values()
    }

    /// Analog parameters in name order
    pub fn analog(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.parameters().filter(|p| !p.is_digital())
    }

    /// Digital parameters in name order
    pub fn digital(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.parameters().filter(|p| p.is_digital())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the schema defines no parameter
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Names whose earlier definition was replaced by a later channel
    pub fn overwritten(&self) -> &[String] {
        &self.overwritten
    }
}

/// Compiles DAQPRJ templates into [`Schema`]s
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    language: Language,
}

impl SchemaCompiler {
    /// Create a compiler attaching descriptions in the given language
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Description language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Compile a catalog firmware, degrading to [`DEFAULT_FIRMWARE`]
    /// when the version is unknown or its template is unusable
    pub fn for_firmware(&self, version: &str) -> Result<Schema, SchemaError> {
        match catalog::template(version) {
            Some(text) => match self.compile_labeled(version, text) {
                Ok(schema) => Ok(schema),
                Err(err) if version != DEFAULT_FIRMWARE => {
                    warn!(
                        "Template for {} unusable ({}), using {} as fallback",
                        version, err, DEFAULT_FIRMWARE
                    );
                    self.compile_labeled(DEFAULT_FIRMWARE, catalog::default_template())
                        .map_err(|fallback| SchemaError::NoUsableTemplate {
                            requested: err.to_string(),
                            fallback: fallback.to_string(),
                        })
                }
                Err(err) => Err(err),
            },
            None => {
                warn!(
                    "Unknown firmware version: {}, using {} as fallback",
                    version, DEFAULT_FIRMWARE
                );
                self.compile_labeled(DEFAULT_FIRMWARE, catalog::default_template())
            }
        }
    }

    /// Compile `template`, or `fallback` if `template` is unusable
    pub fn compile(&self, template: &str, fallback: &str) -> Result<Schema, SchemaError> {
        match self.compile_labeled("custom", template) {
            Ok(schema) => Ok(schema),
            Err(err) => {
                warn!("Template unusable ({}), compiling fallback", err);
                self.compile_labeled("fallback", fallback)
                    .map_err(|fallback| SchemaError::NoUsableTemplate {
                        requested: err.to_string(),
                        fallback: fallback.to_string(),
                    })
            }
        }
    }

    /// Compile a single template without fallback
    pub fn compile_template(&self, template: &str) -> Result<Schema, SchemaError> {
        self.compile_labeled("custom", template)
    }

    fn compile_labeled(&self, firmware: &str, text: &str) -> Result<Schema, SchemaError> {
        let doc =
            roxmltree::Document::parse(text).map_err(|e| SchemaError::Malformed(e.to_string()))?;
        let root = doc.root_element();
        if root.tag_name().name() != "DAQPRJ" {
            return Err(SchemaError::UnexpectedRoot {
                found: root.tag_name().name().to_string(),
            });
        }

        let channels = |group: &'static str| {
            root.descendants().filter(move |node| {
                node.is_element()
                    && node.tag_name().name() == "CHANNEL"
                    && node
                        .parent_element()
                        .map_or(false, |parent| parent.tag_name().name() == group)
            })
        };

        let mut parameters = BTreeMap::new();
        let mut overwritten = Vec::new();
        let mut insert = |definition: ParameterDefinition| {
            // Later definitions replace earlier ones with the same name
            if let Some(previous) = parameters.insert(definition.name.clone(), definition) {
                debug!("Duplicate parameter {} replaced", previous.name);
                overwritten.push(previous.name);
            }
        };

        let mut analog_block = 0;
        for channel in channels("ANALOG") {
            let id = parse_channel_id(&channel)?;
            let name = channel
                .attribute("name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown_{}", id));
            let unit = channel
                .attribute("unit")
                .filter(|u| !u.is_empty())
                .map(str::to_string);

            let definition = ParameterDefinition {
                description: self.describe(&name),
                name,
                slot_index: id,
                kind: ChannelKind::Analog { unit },
            };
            insert(definition);
            analog_block = analog_block.max(id + 1);
        }

        let mut digital_block = 0;
        for channel in channels("DIGITAL") {
            let id = parse_channel_id(&channel)?;
            let name = channel
                .attribute("name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Digital_{}", id));
            let bit = parse_attribute(&channel, "bit")?;
            if bit > 31 {
                return Err(SchemaError::BitOutOfRange { bit, channel: name });
            }

            let definition = ParameterDefinition {
                description: self.describe(&name),
                name,
                slot_index: analog_block + id,
                kind: ChannelKind::Digital {
                    bit_mask: 1u32 << bit,
                },
            };
            insert(definition);
            digital_block = digital_block.max(id + 1);
        }

        let schema = Schema {
            firmware: firmware.to_string(),
            parameters,
            analog_block,
            digital_block,
            overwritten,
        };

        info!(
            "Compiled template {}: {} analog + {} digital slots, {} parameters",
            schema.firmware,
            schema.analog_block,
            schema.digital_block,
            schema.len()
        );

        Ok(schema)
    }

    fn describe(&self, name: &str) -> String {
        catalog::description(name, self.language)
            .unwrap_or(name)
            .to_string()
    }
}

/// Parse a non-negative integer attribute, defaulting to 0 when absent
/// Channel `id` bounded to [`MAX_CHANNEL_ID`]
fn parse_channel_id(channel: &roxmltree::Node<'_, '_>) -> Result<usize, SchemaError> {
    let id = parse_attribute(channel, "id")?;
    if id > MAX_CHANNEL_ID {
        return Err(SchemaError::IdOutOfRange {
            id,
            max: MAX_CHANNEL_ID,
            channel: channel.attribute("name").unwrap_or("?").to_string(),
        });
    }
    Ok(id)
}

fn parse_attribute(
    channel: &roxmltree::Node<'_, '_>,
    attribute: &'static str,
) -> Result<usize, SchemaError> {
    match channel.attribute(attribute) {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SchemaError::InvalidAttribute {
                attribute,
                value: raw.to_string(),
                channel: channel.attribute("name").unwrap_or("?").to_string(),
            }),
    }
}
