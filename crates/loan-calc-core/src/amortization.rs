//! Amortized-loan analytics: single-payment breakdown, payoff simulation,
//! and the standard annuity payment estimate. All math in
//! `rust_decimal::Decimal`; no rounding is applied inside this module, so
//! callers own display formatting.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, PaymentBreakdown, PaymentFrequency, PayoffSummary, Rate, TermUnit};
use crate::LoanCalcResult;

/// Iteration cap for the payoff simulation. Roughly 190 years of weekly
/// payments, far past any real schedule.
const MAX_PAYOFF_PERIODS: u32 = 10_000;

/// Break a single payment into principal, interest, and fee portions.
///
/// Interest accrues at the annual rate divided by the payment frequency, the
/// fee comes off the top, and whatever remains reduces principal. This is a
/// pure formula evaluator: amounts that make no business sense (a payment
/// smaller than the accrued interest, a negative balance) are computed as-is,
/// not rejected.
pub fn calculate_payment(
    loan_amount: Money,
    total_payment_amount: Money,
    fee_amount: Money,
    annual_rate_pct: Rate,
    pay_frequency: u32,
) -> LoanCalcResult<PaymentBreakdown> {
    let frequency = PaymentFrequency::from_payments_per_year(pay_frequency)?;

    let interest = loan_amount * (annual_rate_pct / dec!(100))
        / Decimal::from(frequency.payments_per_year());
    let principal = total_payment_amount - fee_amount - interest;

    Ok(PaymentBreakdown {
        principal,
        interest,
        other: fee_amount,
        remaining_principal: loan_amount - principal,
    })
}

/// Estimate the periodic payment that retires a loan over a fixed term.
///
/// Uses the annuity formula M = P * i(1+i)^n / ((1+i)^n - 1) on the monthly
/// rate, then adds the fee. The formula is 0/0 at i = 0, so a zero rate falls
/// back to the linear payment `loan_amount / total_months`.
pub fn estimate_payment_amount(
    loan_amount: Money,
    fee_amount: Money,
    annual_rate_pct: Rate,
    term_unit: u32,
    term_count: i64,
) -> LoanCalcResult<Money> {
    let unit = TermUnit::from_months_multiplier(term_unit)?;

    let total_months = term_count * i64::from(unit.months_multiplier());
    if total_months <= 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "term_count".into(),
            reason: "Term length must be at least one month".into(),
        });
    }

    let monthly_rate = (annual_rate_pct / dec!(100)) / dec!(12);
    let payment = if monthly_rate.is_zero() {
        loan_amount / Decimal::from(total_months)
    } else {
        let factor = (Decimal::ONE + monthly_rate).powu(total_months as u64);
        loan_amount * (monthly_rate * factor) / (factor - Decimal::ONE)
    };

    Ok(payment + fee_amount)
}

/// Simulate a loan under a fixed payment until it is paid off.
///
/// Standard payments are applied while a full one still fits; the remaining
/// balance is then cleared by one final partial payment whose interest is
/// accrued at the same per-period rate. Total interest and the payment count
/// include that final payment.
pub fn calculate_payoff_time(
    loan_amount: Money,
    total_payment_amount: Money,
    fee_amount: Money,
    annual_rate_pct: Rate,
    pay_frequency: u32,
) -> LoanCalcResult<PayoffSummary> {
    let frequency = PaymentFrequency::from_payments_per_year(pay_frequency)?;

    let mut remaining_principal = loan_amount;
    let mut payment_count: u32 = 0;
    let mut total_interest = Decimal::ZERO;

    while remaining_principal + fee_amount >= total_payment_amount {
        if payment_count >= MAX_PAYOFF_PERIODS {
            return Err(LoanCalcError::ConvergenceFailure {
                function: "calculate_payoff_time".into(),
                iterations: payment_count,
                last_delta: remaining_principal,
            });
        }

        let payment = calculate_payment(
            remaining_principal,
            total_payment_amount,
            fee_amount,
            annual_rate_pct,
            pay_frequency,
        )?;

        // A non-positive principal portion means the balance never decreases.
        if payment.principal <= Decimal::ZERO {
            return Err(LoanCalcError::InvalidInput {
                field: "total_payment_amount".into(),
                reason: "Payment does not cover accrued interest and fees; the loan never amortizes"
                    .into(),
            });
        }

        remaining_principal = payment.remaining_principal;
        total_interest += payment.interest;
        payment_count += 1;
    }

    // Final partial payment clears the balance exactly.
    let final_interest = remaining_principal * (annual_rate_pct / dec!(100))
        / Decimal::from(frequency.payments_per_year());
    let final_payment_amount = remaining_principal + fee_amount + final_interest;
    total_interest += final_interest;
    payment_count += 1;

    Ok(PayoffSummary {
        number_of_payments: payment_count,
        number_of_months: Decimal::from(payment_count)
            / Decimal::from(frequency.payments_per_month()),
        final_payment_amount,
        total_interest,
    })
}
