use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ScocError;
use crate::loan;
use crate::property::PropertyFinancials;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::ScocResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Adverse assumptions layered on top of a property's baseline financials.
///
/// Every field is a non-negative delta or multiplier; the default scenario is
/// zero stress and reproduces the unstressed cash-on-cash return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StressScenario {
    /// Additive interest-rate shock (0.02 = +200bps)
    pub rate_delta: Rate,
    /// Vacancy weeks per year on top of the baseline assumption
    pub additional_vacancy_weeks: Decimal,
    /// Multiplier applied to total operating expenses
    pub maintenance_multiplier: Decimal,
    /// Absolute annual cost added after the multiplier
    pub maintenance_addition: Money,
}

impl Default for StressScenario {
    fn default() -> Self {
        StressScenario {
            rate_delta: Decimal::ZERO,
            additional_vacancy_weeks: Decimal::ZERO,
            maintenance_multiplier: Decimal::ONE,
            maintenance_addition: Decimal::ZERO,
        }
    }
}

impl StressScenario {
    /// Standard serviceability stress: +200bps on the base rate.
    pub fn standard() -> Self {
        StressScenario {
            rate_delta: dec!(0.02),
            ..Default::default()
        }
    }
}

/// One year of property cash flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowBreakdown {
    /// Gross potential rent at full occupancy
    pub potential_rent: Money,
    pub vacancy_loss: Money,
    /// Rent actually collected
    pub gross_income: Money,
    pub operating_expenses: Money,
    pub debt_service: Money,
    pub net_cash_flow: Money,
}

/// Traffic-light call derived from stressed returns and debt cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Positive return with covenant headroom under stress
    Buy,
    /// Survives stress but with a thin buffer
    Watch,
    /// Negative under stress
    Avoid,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY (resilient)"),
            Signal::Watch => write!(f, "WATCH (thin buffer)"),
            Signal::Avoid => write!(f, "AVOID (negative under stress)"),
        }
    }
}

/// Full output of a stress evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressResult {
    pub address: String,
    pub base: CashFlowBreakdown,
    pub stressed: CashFlowBreakdown,
    /// Deposit plus upfront acquisition costs
    pub cash_invested: Money,
    /// Unstressed annual net cash flow / cash invested
    pub base_cash_on_cash: Rate,
    /// Stress-tested cash-on-cash: stressed net cash flow / cash invested
    pub scoc: Rate,
    /// Annual potential rent / purchase price
    pub gross_yield: Rate,
    /// Stressed NOI / purchase price
    pub net_yield: Rate,
    /// Stressed NOI / stressed debt service (zero when unlevered)
    pub dscr_stress: Decimal,
    pub signal: Signal,
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Evaluate a property's cash-on-cash return under a stress scenario.
///
/// Pure function: builds the baseline and stressed cash-flow breakdowns,
/// computes sCoC = stressed net cash flow / cash invested, and derives the
/// stressed DSCR and an investment signal.
pub fn evaluate(
    property: &PropertyFinancials,
    scenario: &StressScenario,
) -> ScocResult<ComputationOutput<StressResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    property.validate()?;
    validate_scenario(property, scenario, &mut warnings)?;

    let cash_invested = property.cash_invested();

    let base = cash_flow_year(property, &StressScenario::default())?;
    let stressed = cash_flow_year(property, scenario)?;

    let base_cash_on_cash = base.net_cash_flow / cash_invested;
    let scoc = stressed.net_cash_flow / cash_invested;

    let stressed_noi = stressed.gross_income - stressed.operating_expenses;
    let gross_yield = base.potential_rent / property.purchase_price;
    let net_yield = stressed_noi / property.purchase_price;

    let dscr_stress = if stressed.debt_service.is_zero() {
        Decimal::ZERO
    } else {
        stressed_noi / stressed.debt_service
    };

    let signal = derive_signal(scoc, dscr_stress);

    if scoc < Decimal::ZERO {
        warnings.push(format!(
            "Negative cash flow under stress: investor must fund {} per year",
            -stressed.net_cash_flow
        ));
    }

    let result = StressResult {
        address: property.address.clone(),
        base,
        stressed,
        cash_invested,
        base_cash_on_cash,
        scoc,
        gross_yield,
        net_yield,
        dscr_stress,
        signal,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Stress-Tested Cash-on-Cash (sCoC)",
        scenario,
        warnings,
        elapsed,
        result,
    ))
}

/// Build one year of cash flow with the scenario's shocks applied.
fn cash_flow_year(
    property: &PropertyFinancials,
    scenario: &StressScenario,
) -> ScocResult<CashFlowBreakdown> {
    let potential_rent = property.annual_rent();
    let total_vacancy = property.vacancy_weeks + scenario.additional_vacancy_weeks;

    let vacancy_loss = potential_rent * total_vacancy / dec!(52);
    let gross_income = potential_rent - vacancy_loss;

    let operating_expenses = property.operating_expenses.total() * scenario.maintenance_multiplier
        + scenario.maintenance_addition;

    let debt_service = loan::annual_debt_service(
        property.loan_amount,
        property.interest_rate + scenario.rate_delta,
        &property.repayment,
    )?;

    let net_cash_flow = gross_income - debt_service - operating_expenses;

    Ok(CashFlowBreakdown {
        potential_rent,
        vacancy_loss,
        gross_income,
        operating_expenses,
        debt_service,
        net_cash_flow,
    })
}

fn validate_scenario(
    property: &PropertyFinancials,
    scenario: &StressScenario,
    warnings: &mut Vec<String>,
) -> ScocResult<()> {
    if scenario.rate_delta < Decimal::ZERO {
        return Err(ScocError::InvalidInput {
            field: "rate_delta".into(),
            reason: "Rate stress must be a non-negative delta".into(),
        });
    }

    if scenario.additional_vacancy_weeks < Decimal::ZERO {
        return Err(ScocError::InvalidInput {
            field: "additional_vacancy_weeks".into(),
            reason: "Vacancy stress must be a non-negative number of weeks".into(),
        });
    }

    if scenario.maintenance_multiplier < Decimal::ZERO {
        return Err(ScocError::InvalidInput {
            field: "maintenance_multiplier".into(),
            reason: "Maintenance multiplier cannot be negative".into(),
        });
    }

    if scenario.maintenance_addition < Decimal::ZERO {
        return Err(ScocError::InvalidInput {
            field: "maintenance_addition".into(),
            reason: "Maintenance addition must be non-negative".into(),
        });
    }

    let total_vacancy = property.vacancy_weeks + scenario.additional_vacancy_weeks;
    if total_vacancy > dec!(52) {
        return Err(ScocError::InvalidInput {
            field: "additional_vacancy_weeks".into(),
            reason: format!("Total vacancy of {total_vacancy} weeks exceeds a full year"),
        });
    }

    // --- Warnings for unusual assumptions ---
    if total_vacancy > dec!(8) {
        warnings.push(format!(
            "Total vacancy of {total_vacancy} weeks is above typical market norms"
        ));
    }

    if scenario.rate_delta > dec!(0.03) {
        warnings.push(format!(
            "Rate stress of {} exceeds the usual 300bps serviceability buffer",
            scenario.rate_delta
        ));
    }

    if !property.purchase_price.is_zero() {
        let lvr = property.loan_amount / property.purchase_price;
        if lvr > dec!(0.90) {
            warnings.push(format!(
                "LVR of {:.1}% exceeds 90% — high leverage",
                lvr * dec!(100)
            ));
        }
    }

    Ok(())
}

fn derive_signal(scoc: Rate, dscr_stress: Decimal) -> Signal {
    if scoc >= dec!(0.02) && dscr_stress >= dec!(1.10) {
        Signal::Buy
    } else if scoc >= Decimal::ZERO && dscr_stress >= Decimal::ONE {
        Signal::Watch
    } else {
        Signal::Avoid
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{OperatingExpenses, RentalIncome, RepaymentStructure};

    /// Interest-only test property: $500k price, $100k deposit, 6% base rate,
    /// $25k annual rent, $5k annual costs, no baseline vacancy.
    fn sample_property() -> PropertyFinancials {
        PropertyFinancials {
            address: "Test Property".into(),
            purchase_price: dec!(500000),
            deposit: dec!(100000),
            loan_amount: dec!(400000),
            interest_rate: dec!(0.06),
            repayment: RepaymentStructure::InterestOnly,
            rental_income: RentalIncome::Annual(dec!(25000)),
            operating_expenses: OperatingExpenses {
                other: dec!(5000),
                ..Default::default()
            },
            vacancy_weeks: Decimal::ZERO,
            upfront_costs: Decimal::ZERO,
        }
    }

    fn worked_scenario() -> StressScenario {
        StressScenario {
            rate_delta: dec!(0.02),
            additional_vacancy_weeks: dec!(4),
            maintenance_multiplier: dec!(1.2),
            maintenance_addition: Decimal::ZERO,
        }
    }

    #[test]
    fn test_worked_example() {
        let output = evaluate(&sample_property(), &worked_scenario()).unwrap();
        let r = output.result;

        // Interest at 8% on $400k
        assert_eq!(r.stressed.debt_service, dec!(32000.00));
        // Rent collected over 48 of 52 weeks
        assert!((r.stressed.gross_income - dec!(23076.92)).abs() < dec!(0.01));
        // Costs scaled by 1.2
        assert_eq!(r.stressed.operating_expenses, dec!(6000.0));
        // Net = 23,076.92 - 32,000 - 6,000
        assert!((r.stressed.net_cash_flow - dec!(-14923.08)).abs() < dec!(0.01));
        // sCoC ≈ -14.92%
        assert!((r.scoc - dec!(-0.1492)).abs() < dec!(0.001));
        assert_eq!(r.signal, Signal::Avoid);
    }

    #[test]
    fn test_zero_stress_reproduces_base_coc() {
        let output = evaluate(&sample_property(), &StressScenario::default()).unwrap();
        let r = output.result;

        assert_eq!(r.scoc, r.base_cash_on_cash);
        assert_eq!(r.stressed.net_cash_flow, r.base.net_cash_flow);
        // Base: 25,000 - 24,000 interest - 5,000 costs = -4,000 on 100k
        assert_eq!(r.base.net_cash_flow, dec!(-4000.00));
        assert_eq!(r.scoc, dec!(-0.04));
    }

    #[test]
    fn test_scoc_monotonic_in_rate_delta() {
        let property = sample_property();
        let mut previous = Decimal::MAX;

        for bps in [0u32, 50, 100, 200, 400] {
            let scenario = StressScenario {
                rate_delta: Decimal::from(bps) / dec!(10000),
                ..Default::default()
            };
            let scoc = evaluate(&property, &scenario).unwrap().result.scoc;
            assert!(
                scoc < previous || bps == 0,
                "sCoC {scoc} did not fall as rate stress rose to {bps}bps"
            );
            previous = scoc;
        }
    }

    #[test]
    fn test_scoc_monotonic_in_vacancy() {
        let property = sample_property();
        let mut previous = Decimal::MAX;

        for weeks in [0u32, 2, 4, 8, 16] {
            let scenario = StressScenario {
                additional_vacancy_weeks: Decimal::from(weeks),
                ..Default::default()
            };
            let scoc = evaluate(&property, &scenario).unwrap().result.scoc;
            assert!(
                scoc < previous || weeks == 0,
                "sCoC {scoc} did not fall as vacancy rose to {weeks} weeks"
            );
            previous = scoc;
        }
    }

    #[test]
    fn test_zero_cash_invested_rejected() {
        let mut property = sample_property();
        property.deposit = Decimal::ZERO;
        property.loan_amount = dec!(500000);
        property.upfront_costs = Decimal::ZERO;

        let err = evaluate(&property, &StressScenario::default()).unwrap_err();
        match err {
            ScocError::InvalidInput { field, .. } => assert_eq!(field, "cash_invested"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rent_rejected() {
        let mut property = sample_property();
        property.rental_income = RentalIncome::Annual(dec!(-100));

        assert!(evaluate(&property, &StressScenario::default()).is_err());
    }

    #[test]
    fn test_vacancy_beyond_a_year_rejected() {
        let scenario = StressScenario {
            additional_vacancy_weeks: dec!(53),
            ..Default::default()
        };

        assert!(evaluate(&sample_property(), &scenario).is_err());
    }

    #[test]
    fn test_negative_rate_delta_rejected() {
        let scenario = StressScenario {
            rate_delta: dec!(-0.01),
            ..Default::default()
        };

        assert!(evaluate(&sample_property(), &scenario).is_err());
    }

    #[test]
    fn test_signal_thresholds() {
        assert_eq!(derive_signal(dec!(0.03), dec!(1.2)), Signal::Buy);
        assert_eq!(derive_signal(dec!(0.01), dec!(1.05)), Signal::Watch);
        assert_eq!(derive_signal(dec!(0.03), dec!(1.05)), Signal::Watch);
        assert_eq!(derive_signal(dec!(-0.01), dec!(1.5)), Signal::Avoid);
        assert_eq!(derive_signal(dec!(0.01), dec!(0.9)), Signal::Avoid);
    }

    #[test]
    fn test_methodology_string() {
        let output = evaluate(&sample_property(), &StressScenario::default()).unwrap();
        assert_eq!(output.methodology, "Stress-Tested Cash-on-Cash (sCoC)");
    }

    #[test]
    fn test_negative_scoc_warns() {
        let output = evaluate(&sample_property(), &worked_scenario()).unwrap();
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("Negative cash flow under stress")));
    }
}
