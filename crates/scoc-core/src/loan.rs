use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ScocError;
use crate::property::RepaymentStructure;
use crate::types::{Money, Rate};
use crate::ScocResult;

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1)
pub fn monthly_payment(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
) -> ScocResult<Money> {
    if total_months == 0 {
        return Err(ScocError::DivisionByZero {
            context: "monthly payment over a zero-month schedule".into(),
        });
    }

    if monthly_rate.is_zero() {
        // Interest-free: straight-line amortisation
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound *= Decimal::ONE + monthly_rate;
    }

    let numerator = principal * monthly_rate * compound;
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(ScocError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    Ok(numerator / denominator)
}

/// Annual debt service for a loan at the given rate.
///
/// Interest-only loans pay `loan × rate`; amortising loans pay the standard
/// monthly P&I payment annualised.
pub fn annual_debt_service(
    loan_amount: Money,
    annual_rate: Rate,
    repayment: &RepaymentStructure,
) -> ScocResult<Money> {
    if loan_amount.is_zero() {
        return Ok(Decimal::ZERO);
    }

    match *repayment {
        RepaymentStructure::InterestOnly => Ok(loan_amount * annual_rate),
        RepaymentStructure::PrincipalAndInterest { term_years } => {
            if term_years == 0 {
                return Err(ScocError::DivisionByZero {
                    context: "P&I debt service over a zero-year term".into(),
                });
            }
            let payment = monthly_payment(loan_amount, annual_rate / dec!(12), term_years * 12)?;
            Ok(payment * dec!(12))
        }
    }
}
