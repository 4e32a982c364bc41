//! Schema command implementation

use anyhow::Result;

use crate::config::schema::OPTION_SPECS;

pub fn run() -> Result<()> {
    println!("Recognized options:");
    for spec in OPTION_SPECS {
        let default = spec.default.to_value().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        println!("  {:<16} {:<34} {:<9} {}", spec.name, spec.kind.describe(), default, spec.description);
    }
    println!("Other keys are passed through to the formatter unchanged.");
    Ok(())
}
