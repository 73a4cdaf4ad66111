use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ScocError;
use crate::property::PropertyFinancials;
use crate::stress::{evaluate, Signal, StressScenario};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::ScocResult;

/// One row of a ranked comparison, best sCoC first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedProperty {
    pub address: String,
    pub purchase_price: Money,
    pub scoc: Rate,
    pub base_cash_on_cash: Rate,
    pub stressed_net_cash_flow: Money,
    pub gross_yield: Rate,
    pub net_yield: Rate,
    pub dscr_stress: Decimal,
    pub signal: Signal,
}

/// Evaluate every property under one shared scenario and rank by sCoC
/// descending. Warnings from individual evaluations are collected with the
/// property address prefixed.
pub fn rank_properties(
    properties: &[PropertyFinancials],
    scenario: &StressScenario,
) -> ScocResult<ComputationOutput<Vec<RankedProperty>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if properties.is_empty() {
        return Err(ScocError::InsufficientData(
            "At least one property is required for ranking".into(),
        ));
    }

    let mut rows = Vec::with_capacity(properties.len());

    for property in properties {
        let output = evaluate(property, scenario)?;
        for w in &output.warnings {
            warnings.push(format!("{}: {}", property.address, w));
        }
        let r = output.result;

        rows.push(RankedProperty {
            address: r.address,
            purchase_price: property.purchase_price,
            scoc: r.scoc,
            base_cash_on_cash: r.base_cash_on_cash,
            stressed_net_cash_flow: r.stressed.net_cash_flow,
            gross_yield: r.gross_yield,
            net_yield: r.net_yield,
            dscr_stress: r.dscr_stress,
            signal: r.signal,
        });
    }

    rows.sort_by(|a, b| b.scoc.cmp(&a.scoc));

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Stress-Tested Cash-on-Cash (sCoC) Ranking",
        scenario,
        warnings,
        elapsed,
        rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{AssumptionDefaults, OperatingExpenses};
    use rust_decimal_macros::dec;

    fn listing(address: &str, price: Decimal, weekly_rent: Decimal) -> PropertyFinancials {
        PropertyFinancials::from_market_inputs(
            address,
            price,
            weekly_rent,
            OperatingExpenses::default(),
            None,
            &AssumptionDefaults::default(),
        )
    }

    #[test]
    fn test_rank_orders_by_scoc_descending() {
        let properties = vec![
            listing("Low yield", dec!(900000), dec!(500)),
            listing("High yield", dec!(500000), dec!(650)),
            listing("Mid yield", dec!(700000), dec!(600)),
        ];

        let output = rank_properties(&properties, &StressScenario::standard()).unwrap();
        let rows = output.result;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].address, "High yield");
        assert_eq!(rows[2].address, "Low yield");
        assert!(rows[0].scoc >= rows[1].scoc && rows[1].scoc >= rows[2].scoc);
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = rank_properties(&[], &StressScenario::standard());
        match result.unwrap_err() {
            ScocError::InsufficientData(_) => {}
            other => panic!("Expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_row_propagates() {
        let mut bad = listing("Broken", dec!(600000), dec!(550));
        bad.deposit = Decimal::ZERO; // violates loan + deposit = price

        let properties = vec![listing("Fine", dec!(600000), dec!(550)), bad];
        assert!(rank_properties(&properties, &StressScenario::standard()).is_err());
    }
}
