use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual interest rates expressed in percent (3.25 = 3.25%).
pub type Rate = Decimal;

/// How frequently loan payments are made, expressed as payments per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Monthly,
    SemiMonthly,
    Weekly,
}

impl PaymentFrequency {
    /// Parse a raw payments-per-year figure (12, 24, or 52).
    pub fn from_payments_per_year(value: u32) -> LoanCalcResult<Self> {
        match value {
            12 => Ok(Self::Monthly),
            24 => Ok(Self::SemiMonthly),
            52 => Ok(Self::Weekly),
            _ => Err(LoanCalcError::InvalidInput {
                field: "pay_frequency".into(),
                reason: format!("Payment frequency must be 12, 24, or 52, got {value}"),
            }),
        }
    }

    pub fn payments_per_year(self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::SemiMonthly => 24,
            Self::Weekly => 52,
        }
    }

    /// Payments per month, used to convert a payment count into months.
    /// Weekly uses 4 even though 52/12 is not whole; month figures quoted
    /// downstream rely on that convention.
    pub fn payments_per_month(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::SemiMonthly => 2,
            Self::Weekly => 4,
        }
    }
}

/// Unit a loan term is quoted in, expressed as its month multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermUnit {
    Years,
    Months,
}

impl TermUnit {
    /// Parse a raw month-multiplier figure (12 for years, 1 for months).
    pub fn from_months_multiplier(value: u32) -> LoanCalcResult<Self> {
        match value {
            12 => Ok(Self::Years),
            1 => Ok(Self::Months),
            _ => Err(LoanCalcError::InvalidInput {
                field: "term_unit".into(),
                reason: format!("Term unit must be 12 (years) or 1 (months), got {value}"),
            }),
        }
    }

    pub fn months_multiplier(self) -> u32 {
        match self {
            Self::Years => 12,
            Self::Months => 1,
        }
    }
}

/// A name/value pair for the presentation layer's select inputs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SelectOption {
    pub name: &'static str,
    pub value: u32,
}

/// Payment-frequency choices offered by the calculator.
pub const PAYMENT_FREQUENCIES: [SelectOption; 3] = [
    SelectOption { name: "Monthly", value: 12 },
    SelectOption { name: "Semi-Monthly", value: 24 },
    SelectOption { name: "Weekly", value: 52 },
];

/// Loan-term units offered by the calculator.
pub const TERM_UNITS: [SelectOption; 2] = [
    SelectOption { name: "Years", value: 12 },
    SelectOption { name: "Months", value: 1 },
];

/// Breakdown of a single payment applied to an outstanding balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: Money,
    pub interest: Money,
    pub other: Money,
    pub remaining_principal: Money,
}

/// Result of simulating a loan through to its final payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSummary {
    pub number_of_payments: u32,
    /// Payment count converted to months; fractional for semi-monthly and
    /// weekly schedules.
    pub number_of_months: Decimal,
    pub final_payment_amount: Money,
    pub total_interest: Money,
}
