//! Example: Validate the built-in firmware catalog.
//!
//! Run with: cargo run --example validate_catalog -- [--verbose] [template.xml ...]

use hargassner_testdata::ParameterValidator;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    println!("Hargassner Catalog Validator");
    println!("============================\n");

    let validator = ParameterValidator::new();
    let report = if files.is_empty() {
        validator.validate_catalog()
    } else {
        let mut templates = Vec::new();
        for path in &files {
            match std::fs::read_to_string(path) {
                Ok(text) => templates.push((path.as_str(), text)),
                Err(e) => {
                    eprintln!("Error: Could not read {}: {}", path, e);
                    std::process::exit(2);
                }
            }
        }
        validator.validate_templates(templates.iter().map(|(name, text)| (*name, text.as_str())))
    };

    println!("{}", report.render(verbose));

    if !report.passed() {
        std::process::exit(1);
    }
}
