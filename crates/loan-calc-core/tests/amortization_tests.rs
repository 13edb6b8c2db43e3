use loan_calc_core::amortization::{
    calculate_payment, calculate_payoff_time, estimate_payment_amount,
};
use loan_calc_core::{LoanCalcError, PAYMENT_FREQUENCIES, TERM_UNITS};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Payment breakdown tests
// ===========================================================================

#[test]
fn test_payment_breakdown_mortgage() {
    let result = calculate_payment(dec!(300000), dec!(1800), dec!(500), dec!(3.25), 12).unwrap();

    assert_eq!(result.principal, dec!(487.5));
    assert_eq!(result.interest, dec!(812.5));
    assert_eq!(result.other, dec!(500));
    assert_eq!(result.remaining_principal, dec!(299512.5));
}

#[test]
fn test_payment_breakdown_lower_amount() {
    let result = calculate_payment(dec!(250000), dec!(1200), dec!(200), dec!(4.5), 12).unwrap();

    assert_eq!(result.principal, dec!(62.5));
    assert_eq!(result.interest, dec!(937.5));
    assert_eq!(result.other, dec!(200));
    assert_eq!(result.remaining_principal, dec!(249937.5));
}

#[test]
fn test_payment_breakdown_balance_invariant_all_frequencies() {
    // Principal reduction plus the remaining balance must reconstruct the
    // starting balance for every supported frequency.
    for option in PAYMENT_FREQUENCIES {
        let result =
            calculate_payment(dec!(180000), dec!(950), dec!(75), dec!(5.125), option.value)
                .unwrap();
        let drift = (result.remaining_principal + result.principal - dec!(180000)).abs();
        assert!(drift < dec!(0.000000001), "drift {drift} at {}", option.value);
    }
}

#[test]
fn test_payment_breakdown_rejects_bogus_frequency() {
    let result = calculate_payment(dec!(300000), dec!(1800), dec!(500), dec!(3.25), 12345);
    assert!(matches!(result, Err(LoanCalcError::InvalidInput { .. })));
}

// ===========================================================================
// Payment estimate tests
// ===========================================================================

#[test]
fn test_estimate_thirty_year_mortgage() {
    let result = estimate_payment_amount(dec!(300000), dec!(500), dec!(3.25), 12, 30).unwrap();
    assert!((result - dec!(1805.62)).abs() < dec!(0.01));
}

#[test]
fn test_estimate_term_unit_equivalence() {
    // 30 years and 360 months describe the same schedule.
    let years = estimate_payment_amount(dec!(300000), dec!(500), dec!(3.25), 12, 30).unwrap();
    let months = estimate_payment_amount(dec!(300000), dec!(500), dec!(3.25), 1, 360).unwrap();
    assert_eq!(years, months);
}

#[test]
fn test_estimate_lower_amount() {
    let result = estimate_payment_amount(dec!(250000), dec!(200), dec!(4.5), 12, 30).unwrap();
    assert!((result - dec!(1466.71)).abs() < dec!(0.01));
}

#[test]
fn test_estimate_rejects_bogus_term_unit() {
    let result = estimate_payment_amount(dec!(300000), dec!(500), dec!(3.25), 12345, 30);
    assert!(matches!(result, Err(LoanCalcError::InvalidInput { .. })));
}

// ===========================================================================
// Payoff time tests
// ===========================================================================

#[test]
fn test_payoff_thirty_year_mortgage() {
    let result = calculate_payoff_time(dec!(300000), dec!(1805.62), dec!(500), dec!(3.25), 12)
        .unwrap();

    assert_eq!(result.number_of_payments, 360);
    assert_eq!(result.number_of_months, dec!(360));
    // The last scheduled payment is slightly short of a full one.
    assert_eq!(result.final_payment_amount.round(), dec!(1805));
    assert!((result.total_interest - dec!(170022.57)).abs() < dec!(0.01));
}

#[test]
fn test_payoff_lower_amount() {
    let result = calculate_payoff_time(dec!(250000), dec!(1466.71), dec!(200), dec!(4.5), 12)
        .unwrap();

    assert_eq!(result.number_of_payments, 360);
    assert_eq!(result.number_of_months, dec!(360));
    assert!((result.total_interest - dec!(206018.09)).abs() < dec!(0.01));
}

#[test]
fn test_payoff_rejects_bogus_frequency() {
    let result = calculate_payoff_time(dec!(300000), dec!(1805.62), dec!(500), dec!(3.25), 12345);
    assert!(matches!(result, Err(LoanCalcError::InvalidInput { .. })));
}

// ===========================================================================
// Reference tables and determinism
// ===========================================================================

#[test]
fn test_option_tables_match_supported_values() {
    let frequencies: Vec<u32> = PAYMENT_FREQUENCIES.iter().map(|o| o.value).collect();
    assert_eq!(frequencies, vec![12, 24, 52]);

    let units: Vec<u32> = TERM_UNITS.iter().map(|o| o.value).collect();
    assert_eq!(units, vec![12, 1]);

    assert_eq!(PAYMENT_FREQUENCIES[1].name, "Semi-Monthly");
    assert_eq!(TERM_UNITS[0].name, "Years");
}

#[test]
fn test_operations_are_deterministic() {
    let first = calculate_payoff_time(dec!(300000), dec!(1805.62), dec!(500), dec!(3.25), 12)
        .unwrap();
    let second = calculate_payoff_time(dec!(300000), dec!(1805.62), dec!(500), dec!(3.25), 12)
        .unwrap();
    assert_eq!(first, second);

    let est_a = estimate_payment_amount(dec!(300000), dec!(500), dec!(3.25), 12, 30).unwrap();
    let est_b = estimate_payment_amount(dec!(300000), dec!(500), dec!(3.25), 12, 30).unwrap();
    assert_eq!(est_a, est_b);
}

#[test]
fn test_breakdown_serializes_money_as_strings() {
    let breakdown =
        calculate_payment(dec!(300000), dec!(1800), dec!(500), dec!(3.25), 12).unwrap();
    let json = serde_json::to_value(&breakdown).unwrap();

    assert_eq!(json["interest"], serde_json::json!("812.5"));
    assert_eq!(json["remaining_principal"], serde_json::json!("299512.5"));
}
