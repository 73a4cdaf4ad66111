use clap::Args;
use serde_json::Value;

use scoc_core::property::PropertyFinancials;
use scoc_core::stress::{self, StressScenario};

use crate::input;

/// Arguments for single-property stress evaluation
#[derive(Args)]
pub struct StressArgs {
    /// Path to a JSON or YAML property file (or pipe JSON on stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON or YAML scenario file; defaults to the standard
    /// +200bps serviceability stress
    #[arg(long)]
    pub scenario: Option<String>,
}

pub fn run_stress(args: StressArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let property: PropertyFinancials = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json|yaml> or stdin required for stress evaluation".into());
    };

    let scenario = load_scenario(&args.scenario)?;

    let result = stress::evaluate(&property, &scenario)?;
    Ok(serde_json::to_value(result)?)
}

/// Read a scenario file, or fall back to the standard preset.
pub fn load_scenario(
    path: &Option<String>,
) -> Result<StressScenario, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(input::file::read_structured(p)?),
        None => Ok(StressScenario::standard()),
    }
}
