use clap::Args;
use rust_decimal_macros::dec;
use serde_json::Value;

use scoc_core::property::{AssumptionDefaults, OperatingExpenses, PropertyFinancials};
use scoc_core::ranking;
use scoc_core::types::Money;

use crate::commands::stress::load_scenario;
use crate::input;

/// Arguments for multi-property ranking
#[derive(Args)]
pub struct RankArgs {
    /// Path to a CSV, JSON, or YAML file of properties (or pipe JSON on stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON or YAML scenario file; defaults to the standard
    /// +200bps serviceability stress
    #[arg(long)]
    pub scenario: Option<String>,

    /// Use the built-in demo dataset instead of a file
    #[arg(long)]
    pub demo: bool,
}

pub fn run_rank(args: RankArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let properties: Vec<PropertyFinancials> = if args.demo {
        demo_properties()
    } else if let Some(ref path) = args.input {
        if path.ends_with(".csv") {
            input::csv_in::read_properties(path, &AssumptionDefaults::default())?
        } else {
            input::file::read_structured(path)?
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(
            "--input <file.csv|json|yaml>, --demo, or stdin required for ranking".into(),
        );
    };

    let scenario = load_scenario(&args.scenario)?;

    let result = ranking::rank_properties(&properties, &scenario)?;
    Ok(serde_json::to_value(result)?)
}

/// Fictional but realistic AU listings, for a first run without data.
fn demo_properties() -> Vec<PropertyFinancials> {
    let defaults = AssumptionDefaults::default();

    let listing = |address: &str,
                   price: Money,
                   weekly_rent: Money,
                   council_rates: Money,
                   strata_body_corp: Money,
                   insurance: Money,
                   land_tax: Money,
                   other: Money| {
        PropertyFinancials::from_market_inputs(
            address,
            price,
            weekly_rent,
            OperatingExpenses {
                council_rates,
                strata_body_corp,
                insurance,
                land_tax,
                other,
                ..Default::default()
            },
            Some(dec!(0.065)),
            &defaults,
        )
    };

    vec![
        listing(
            "12 Park St, Box Hill VIC",
            dec!(900000),
            dec!(720),
            dec!(2200),
            dec!(0),
            dec!(1200),
            dec!(800),
            dec!(500),
        ),
        listing(
            "4/18 Beach Rd, St Kilda VIC",
            dec!(650000),
            dec!(620),
            dec!(1500),
            dec!(2400),
            dec!(900),
            dec!(0),
            dec!(600),
        ),
        listing(
            "7 River Gums Dr, Werribee VIC",
            dec!(680000),
            dec!(520),
            dec!(1900),
            dec!(0),
            dec!(1100),
            dec!(300),
            dec!(500),
        ),
        listing(
            "22 King St, Newcastle NSW",
            dec!(850000),
            dec!(780),
            dec!(2100),
            dec!(0),
            dec!(1200),
            dec!(700),
            dec!(600),
        ),
        listing(
            "3/55 James St, Fortitude Valley QLD",
            dec!(580000),
            dec!(600),
            dec!(1400),
            dec!(2800),
            dec!(800),
            dec!(0),
            dec!(700),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoc_core::stress::StressScenario;

    #[test]
    fn test_demo_dataset_ranks_cleanly() {
        let properties = demo_properties();
        assert_eq!(properties.len(), 5);

        let output = ranking::rank_properties(&properties, &StressScenario::standard()).unwrap();
        assert_eq!(output.result.len(), 5);
    }
}
