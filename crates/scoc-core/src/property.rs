use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ScocError;
use crate::types::{Money, Rate};
use crate::ScocResult;

/// Rental income as quoted in a listing. Normalised to annual for all maths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalIncome {
    Weekly(Money),
    Monthly(Money),
    Annual(Money),
}

impl RentalIncome {
    /// Annual gross potential rent (52 weeks / 12 months).
    pub fn annual(&self) -> Money {
        match *self {
            RentalIncome::Weekly(rent) => rent * dec!(52),
            RentalIncome::Monthly(rent) => rent * dec!(12),
            RentalIncome::Annual(rent) => rent,
        }
    }
}

/// Annual operating cost components. Missing columns default to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingExpenses {
    pub council_rates: Money,
    pub strata_body_corp: Money,
    pub insurance: Money,
    pub land_tax: Money,
    pub management_fees: Money,
    /// Baseline repairs and maintenance allowance
    pub maintenance: Money,
    /// Annual capital-expenditure reserve
    pub capex_reserve: Money,
    pub other: Money,
}

impl OperatingExpenses {
    pub fn total(&self) -> Money {
        self.council_rates
            + self.strata_body_corp
            + self.insurance
            + self.land_tax
            + self.management_fees
            + self.maintenance
            + self.capex_reserve
            + self.other
    }
}

/// How the loan is serviced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentStructure {
    /// Debt service = loan balance × annual rate
    InterestOnly,
    /// Standard amortising loan, monthly repayments annualised
    PrincipalAndInterest { term_years: u32 },
}

/// Standard underwriting assumptions applied when a listing only provides
/// price, rent, and cost columns (the CSV input path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumptionDefaults {
    /// Weeks per year the property is assumed unrented
    pub vacancy_weeks: Decimal,
    /// Maintenance allowance as a fraction of gross annual rent
    pub maintenance_rate: Rate,
    /// Capex reserve as a fraction of purchase price
    pub capex_rate: Rate,
    /// Stamp duty, legals, LMI etc. as a fraction of purchase price
    pub purchase_cost_rate: Rate,
    /// Loan-to-value ratio
    pub lvr: Rate,
    pub loan_term_years: u32,
    /// Interest rate assumed when the listing carries none
    pub interest_rate: Rate,
}

impl Default for AssumptionDefaults {
    fn default() -> Self {
        AssumptionDefaults {
            vacancy_weeks: dec!(4),
            maintenance_rate: dec!(0.05),
            capex_rate: dec!(0.01),
            purchase_cost_rate: dec!(0.05),
            lvr: dec!(0.80),
            loan_term_years: 30,
            interest_rate: dec!(0.065),
        }
    }
}

/// Financial facts for a single property under analysis.
///
/// Invariant: `loan_amount + deposit == purchase_price`. Upfront costs sit on
/// top of the deposit and count toward cash invested, not the purchase price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyFinancials {
    pub address: String,
    pub purchase_price: Money,
    /// Equity contributed at settlement
    pub deposit: Money,
    pub loan_amount: Money,
    /// Annual base interest rate
    pub interest_rate: Rate,
    pub repayment: RepaymentStructure,
    pub rental_income: RentalIncome,
    #[serde(default)]
    pub operating_expenses: OperatingExpenses,
    /// Baseline vacancy assumption in weeks per year
    #[serde(default)]
    pub vacancy_weeks: Decimal,
    /// Stamp duty, legals, LMI and other acquisition costs
    #[serde(default)]
    pub upfront_costs: Money,
}

impl PropertyFinancials {
    /// Build a property from market inputs (price, weekly rent, cost columns)
    /// using standard underwriting assumptions for financing and reserves.
    pub fn from_market_inputs(
        address: impl Into<String>,
        purchase_price: Money,
        weekly_rent: Money,
        mut operating_expenses: OperatingExpenses,
        interest_rate: Option<Rate>,
        defaults: &AssumptionDefaults,
    ) -> Self {
        let annual_rent = weekly_rent * dec!(52);
        if operating_expenses.maintenance.is_zero() {
            operating_expenses.maintenance = defaults.maintenance_rate * annual_rent;
        }
        if operating_expenses.capex_reserve.is_zero() {
            operating_expenses.capex_reserve = defaults.capex_rate * purchase_price;
        }

        let loan_amount = purchase_price * defaults.lvr;

        PropertyFinancials {
            address: address.into(),
            purchase_price,
            deposit: purchase_price - loan_amount,
            loan_amount,
            interest_rate: interest_rate.unwrap_or(defaults.interest_rate),
            repayment: RepaymentStructure::PrincipalAndInterest {
                term_years: defaults.loan_term_years,
            },
            rental_income: RentalIncome::Weekly(weekly_rent),
            operating_expenses,
            vacancy_weeks: defaults.vacancy_weeks,
            upfront_costs: purchase_price * defaults.purchase_cost_rate,
        }
    }

    /// Annual gross potential rent before vacancy.
    pub fn annual_rent(&self) -> Money {
        self.rental_income.annual()
    }

    /// Total cash the investor puts in: deposit plus acquisition costs.
    pub fn cash_invested(&self) -> Money {
        self.deposit + self.upfront_costs
    }

    pub(crate) fn validate(&self) -> ScocResult<()> {
        if self.purchase_price <= Decimal::ZERO {
            return Err(ScocError::InvalidInput {
                field: "purchase_price".into(),
                reason: "Purchase price must be positive".into(),
            });
        }

        if self.annual_rent() < Decimal::ZERO {
            return Err(ScocError::InvalidInput {
                field: "rental_income".into(),
                reason: "Rental income cannot be negative".into(),
            });
        }

        if self.loan_amount < Decimal::ZERO {
            return Err(ScocError::InvalidInput {
                field: "loan_amount".into(),
                reason: "Loan amount cannot be negative".into(),
            });
        }

        if self.interest_rate < Decimal::ZERO {
            return Err(ScocError::InvalidInput {
                field: "interest_rate".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }

        if self.loan_amount + self.deposit != self.purchase_price {
            return Err(ScocError::InvalidInput {
                field: "deposit".into(),
                reason: format!(
                    "Loan ({}) plus deposit ({}) must equal purchase price ({})",
                    self.loan_amount, self.deposit, self.purchase_price
                ),
            });
        }

        if self.vacancy_weeks < Decimal::ZERO || self.vacancy_weeks > dec!(52) {
            return Err(ScocError::InvalidInput {
                field: "vacancy_weeks".into(),
                reason: "Baseline vacancy must be between 0 and 52 weeks".into(),
            });
        }

        if self.cash_invested() <= Decimal::ZERO {
            return Err(ScocError::InvalidInput {
                field: "cash_invested".into(),
                reason: "Cash invested (deposit + upfront costs) must be positive".into(),
            });
        }

        Ok(())
    }
}
