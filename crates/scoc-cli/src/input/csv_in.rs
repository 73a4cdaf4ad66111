use rust_decimal::Decimal;
use serde::Deserialize;

use scoc_core::property::{AssumptionDefaults, OperatingExpenses, PropertyFinancials};

use crate::input::file::resolve_path;

/// Column order of the CSV input template. Cost and financing columns are
/// optional; blank cells fall back to the standard assumptions.
pub const TEMPLATE_COLUMNS: [&str; 11] = [
    "address",
    "price",
    "weekly_rent",
    "council_rates",
    "strata_body_corp",
    "insurance",
    "land_tax",
    "other_costs",
    "interest_rate",
    "lvr",
    "loan_term_years",
];

/// One listing row as it arrives from a CSV export.
#[derive(Debug, Deserialize)]
struct ListingRow {
    address: String,
    price: Decimal,
    weekly_rent: Decimal,
    #[serde(default)]
    council_rates: Option<Decimal>,
    #[serde(default)]
    strata_body_corp: Option<Decimal>,
    #[serde(default)]
    insurance: Option<Decimal>,
    #[serde(default)]
    land_tax: Option<Decimal>,
    #[serde(default)]
    other_costs: Option<Decimal>,
    #[serde(default)]
    interest_rate: Option<Decimal>,
    #[serde(default)]
    lvr: Option<Decimal>,
    #[serde(default)]
    loan_term_years: Option<u32>,
}

/// Read listing rows from a CSV file and build properties with the standard
/// underwriting assumptions filling any blank columns.
pub fn read_properties(
    path: &str,
    defaults: &AssumptionDefaults,
) -> Result<Vec<PropertyFinancials>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut reader = csv::Reader::from_path(&canonical)
        .map_err(|e| format!("Failed to open '{}': {}", canonical.display(), e))?;

    let mut properties = Vec::new();
    for (i, record) in reader.deserialize::<ListingRow>().enumerate() {
        let row = record.map_err(|e| format!("Row {}: {}", i + 1, e))?;

        // Per-row financing overrides
        let mut row_defaults = defaults.clone();
        if let Some(lvr) = row.lvr {
            row_defaults.lvr = lvr;
        }
        if let Some(term) = row.loan_term_years {
            row_defaults.loan_term_years = term;
        }

        let expenses = OperatingExpenses {
            council_rates: row.council_rates.unwrap_or_default(),
            strata_body_corp: row.strata_body_corp.unwrap_or_default(),
            insurance: row.insurance.unwrap_or_default(),
            land_tax: row.land_tax.unwrap_or_default(),
            other: row.other_costs.unwrap_or_default(),
            ..Default::default()
        };

        properties.push(PropertyFinancials::from_market_inputs(
            row.address,
            row.price,
            row.weekly_rent,
            expenses,
            row.interest_rate,
            &row_defaults,
        ));
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_read_properties_with_blank_columns() {
        let mut file = tempfile_with(
            "address,price,weekly_rent,council_rates,strata_body_corp,insurance,land_tax,other_costs,interest_rate,lvr,loan_term_years\n\
             \"12 Park St, Box Hill VIC\",900000,720,2200,,1200,800,500,0.065,,\n\
             \"4/18 Beach Rd, St Kilda VIC\",650000,620,1500,2400,900,,600,,0.70,25\n",
        );
        file.flush().unwrap();

        let properties =
            read_properties(file.path().to_str().unwrap(), &AssumptionDefaults::default())
                .unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].loan_amount, dec!(720000.00));
        assert_eq!(properties[0].operating_expenses.strata_body_corp, dec!(0));
        // Row override: 70% LVR on 650k
        assert_eq!(properties[1].loan_amount, dec!(455000.00));
        assert_eq!(properties[1].interest_rate, dec!(0.065));
    }

    fn tempfile_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }
}
