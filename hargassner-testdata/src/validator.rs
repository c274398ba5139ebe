// Hargassner Testdata - Catalog validation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Consistency checks over firmware templates and parameter descriptions.

use hargassner::{catalog, ChannelKind, Language, Schema, SchemaCompiler};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Maximum suspicious names listed individually.
const MAX_LISTED: usize = 10;

/// Result of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Problems that make a template unusable or ambiguous
    pub errors: Vec<String>,
    /// Inconsistencies worth fixing
    pub warnings: Vec<String>,
    /// Statistics
    pub info: Vec<String>,
}

impl ValidationReport {
    /// Check if no error was found.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if neither errors nor warnings were found.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Render a human-readable report.
    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();
        let rule = "=".repeat(70);

        out.push_str(&format!("{}\nRESULTS\n{}\n\n", rule, rule));

        let sections = [
            ("INFO", &self.info, verbose),
            ("WARNINGS", &self.warnings, true),
            ("ERRORS", &self.errors, true),
        ];
        for (title, messages, shown) in sections {
            if shown && !messages.is_empty() {
                out.push_str(&format!("{}:\n", title));
                for msg in messages {
                    out.push_str(&format!("  {}\n", msg));
                }
                out.push('\n');
            }
        }

        out.push_str("SUMMARY:\n");
        out.push_str(&format!("  Errors:   {}\n", self.errors.len()));
        out.push_str(&format!("  Warnings: {}\n", self.warnings.len()));

        if self.is_clean() {
            out.push_str("\n[OK] All checks passed!\n");
        } else if self.passed() {
            out.push_str("\n[WARN] Validation passed with warnings\n");
        } else {
            out.push_str("\n[FAIL] Validation failed\n");
        }
        out
    }
}

/// Validates firmware templates against the description table.
#[derive(Debug, Clone, Default)]
pub struct ParameterValidator {
    language: Language,
}

impl ParameterValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every template in the built-in catalog.
    pub fn validate_catalog(&self) -> ValidationReport {
        let templates: Vec<(&str, &str)> = catalog::versions()
            .filter_map(|version| catalog::template(version).map(|text| (version, text)))
            .collect();
        self.validate_templates(templates)
    }

    /// Validate `(firmware, template)` pairs.
    pub fn validate_templates<'a>(
        &self,
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();
        let compiler = SchemaCompiler::new(self.language);

        let mut schemas = Vec::new();
        for (firmware, text) in templates {
            match compiler.compile_template(text) {
                Ok(schema) => {
                    report.info.push(format!(
                        "[OK] {}: {} parameters ({} analog, {} digital), {} tokens per line",
                        firmware,
                        schema.len(),
                        schema.analog().count(),
                        schema.digital().count(),
                        schema.expected_token_count()
                    ));
                    schemas.push((firmware, schema));
                }
                Err(err) => report
                    .errors
                    .push(format!("[ERROR] {}: Failed to parse template: {}", firmware, err)),
            }
        }

        let names: BTreeSet<&str> = schemas
            .iter()
            .flat_map(|(_, schema)| schema.parameters().map(|p| p.name.as_str()))
            .collect();

        check_descriptions(&names, &mut report);
        for (firmware, schema) in &schemas {
            check_duplicates(firmware, schema, &mut report);
            check_bit_collisions(firmware, schema, &mut report);
        }
        check_naming(&names, &mut report);

        report
    }
}

fn check_descriptions(names: &BTreeSet<&str>, report: &mut ValidationReport) {
    let described: BTreeSet<&str> = catalog::described_parameters().collect();

    let missing: Vec<&&str> = names.difference(&described).collect();
    if !missing.is_empty() {
        report
            .warnings
            .push(format!("[WARN] {} parameters without descriptions:", missing.len()));
        report
            .warnings
            .extend(missing.iter().map(|name| format!("    - {}", name)));
    }

    let extra: Vec<&&str> = described.difference(names).collect();
    if !extra.is_empty() {
        report.warnings.push(format!(
            "[WARN] {} descriptions for non-existent parameters:",
            extra.len()
        ));
        report
            .warnings
            .extend(extra.iter().map(|name| format!("    - {}", name)));
    }

    let covered = names.intersection(&described).count();
    let coverage = if names.is_empty() {
        0.0
    } else {
        covered as f64 / names.len() as f64 * 100.0
    };
    report.info.push(format!(
        "[STAT] Description coverage: {:.1}% ({}/{})",
        coverage,
        covered,
        names.len()
    ));
}

fn check_duplicates(firmware: &str, schema: &Schema, report: &mut ValidationReport) {
    let duplicates: BTreeSet<&str> = schema.overwritten().iter().map(String::as_str).collect();
    if !duplicates.is_empty() {
        report.errors.push(format!(
            "[ERROR] {}: Duplicate parameters: {}",
            firmware,
            duplicates.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }
}

fn check_bit_collisions(firmware: &str, schema: &Schema, report: &mut ValidationReport) {
    let mut owners: BTreeMap<(usize, u32), Vec<&str>> = BTreeMap::new();
    for def in schema.digital() {
        if let ChannelKind::Digital { bit_mask } = def.kind {
            owners
                .entry((def.slot_index, bit_mask))
                .or_default()
                .push(def.name.as_str());
        }
    }

    for ((slot, mask), names) in owners {
        if names.len() > 1 {
            report.errors.push(format!(
                "[ERROR] {}: Bit {} of slot {} shared by {}",
                firmware,
                mask.trailing_zeros(),
                slot,
                names.join(", ")
            ));
        }
    }
}

fn check_naming(names: &BTreeSet<&str>, report: &mut ValidationReport) {
    let suspicious: Vec<String> = names
        .iter()
        .filter_map(|name| {
            if name.trim() != *name {
                Some(format!("{:?} (leading/trailing whitespace)", name))
            } else if name.contains("  ") {
                Some(format!("{:?} (double spaces)", name))
            } else if name.chars().count() > 3 && name.to_lowercase() == *name {
                Some(format!("{:?} (all lowercase)", name))
            } else {
                None
            }
        })
        .collect();

    if suspicious.is_empty() {
        return;
    }
    report.warnings.push(format!(
        "[WARN] {} parameters with suspicious names:",
        suspicious.len()
    ));
    report.warnings.extend(
        suspicious
            .iter()
            .take(MAX_LISTED)
            .map(|name| format!("    - {}", name)),
    );
    if suspicious.len() > MAX_LISTED {
        report.warnings.push(format!(
            "    ... and {} more",
            suspicious.len() - MAX_LISTED
        ));
    }
}
