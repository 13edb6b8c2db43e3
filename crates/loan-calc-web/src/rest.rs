use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Form, Router,
};
use loan_calc_core::amortization::{
    calculate_payment, calculate_payoff_time, estimate_payment_amount,
};
use loan_calc_core::{SelectOption, PAYMENT_FREQUENCIES, TERM_UNITS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::format;

/// Frequency applied when the form omits one (monthly).
const DEFAULT_FREQUENCY: u32 = 12;

/// Term unit applied when the form omits one (years).
const DEFAULT_TERM_UNIT: u32 = 12;

/// JSON envelope returned by every calculator endpoint.
#[derive(Debug, Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn ok(result: String) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    fn err(error: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Reference tables for the page's select inputs.
#[derive(Debug, Serialize)]
struct OptionsResponse {
    frequencies: &'static [SelectOption],
    term_units: &'static [SelectOption],
}

/// Fields shared by the breakdown and payoff forms. Everything arrives as
/// text; empty and missing fields fall back to the documented defaults.
#[derive(Debug, Deserialize)]
pub struct LoanForm {
    loan_amt: Option<String>,
    total_payment_amt: Option<String>,
    fee_amt: Option<String>,
    interest_rate: Option<String>,
    frequency: Option<String>,
}

/// Fields for the payment-estimate form.
#[derive(Debug, Deserialize)]
pub struct TermForm {
    loan_amt: Option<String>,
    fee_amt: Option<String>,
    interest_rate: Option<String>,
    unit_type: Option<String>,
    unit_amt: Option<String>,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(main_page))
        .route("/api/options", get(get_options))
        .route("/calculate-payment-breakdown", post(calculate_payment_breakdown))
        .route("/estimate-remaining", post(estimate_remaining))
        .route("/estimate-payment", post(estimate_payment))
        .layer(CorsLayer::permissive())
}

/// GET / - the calculator page
async fn main_page() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// GET /api/options - select-input reference tables
async fn get_options() -> impl IntoResponse {
    Json(OptionsResponse {
        frequencies: &PAYMENT_FREQUENCIES,
        term_units: &TERM_UNITS,
    })
}

/// POST /calculate-payment-breakdown
async fn calculate_payment_breakdown(Form(form): Form<LoanForm>) -> impl IntoResponse {
    info!("POST /calculate-payment-breakdown");

    match breakdown_text(&form) {
        Ok(text) => (StatusCode::OK, Json(ApiResponse::ok(text))).into_response(),
        Err(e) => {
            warn!("Rejected payment breakdown: {e}");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::err(e))).into_response()
        }
    }
}

/// POST /estimate-remaining
async fn estimate_remaining(Form(form): Form<LoanForm>) -> impl IntoResponse {
    info!("POST /estimate-remaining");

    match payoff_text(&form) {
        Ok(text) => (StatusCode::OK, Json(ApiResponse::ok(text))).into_response(),
        Err(e) => {
            warn!("Rejected payoff estimate: {e}");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::err(e))).into_response()
        }
    }
}

/// POST /estimate-payment
async fn estimate_payment(Form(form): Form<TermForm>) -> impl IntoResponse {
    info!("POST /estimate-payment");

    match estimate_text(&form) {
        Ok(text) => (StatusCode::OK, Json(ApiResponse::ok(text))).into_response(),
        Err(e) => {
            warn!("Rejected payment estimate: {e}");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::err(e))).into_response()
        }
    }
}

fn breakdown_text(form: &LoanForm) -> Result<String, String> {
    let loan_amount = parse_decimal(&form.loan_amt, "loan_amt")?;
    let payment_amount = parse_decimal(&form.total_payment_amt, "total_payment_amt")?;
    let fee_amount = parse_decimal(&form.fee_amt, "fee_amt")?;
    let rate = parse_decimal(&form.interest_rate, "interest_rate")?;
    let frequency = parse_frequency(&form.frequency)?;

    let payment = calculate_payment(loan_amount, payment_amount, fee_amount, rate, frequency)
        .map_err(|e| e.to_string())?;

    Ok(format!(
        "Total Payment: ${}<br>Principal: ${}<br>Interest: ${}<br>Other: ${}<br>Remaining Principal: ${}",
        format::currency(payment_amount),
        format::currency(payment.principal),
        format::currency(payment.interest),
        format::currency(payment.other),
        format::currency(payment.remaining_principal),
    ))
}

fn payoff_text(form: &LoanForm) -> Result<String, String> {
    let loan_amount = parse_decimal(&form.loan_amt, "loan_amt")?;
    let payment_amount = parse_decimal(&form.total_payment_amt, "total_payment_amt")?;
    let fee_amount = parse_decimal(&form.fee_amt, "fee_amt")?;
    let rate = parse_decimal(&form.interest_rate, "interest_rate")?;
    let frequency = parse_frequency(&form.frequency)?;

    let payoff = calculate_payoff_time(loan_amount, payment_amount, fee_amount, rate, frequency)
        .map_err(|e| e.to_string())?;

    Ok(format!(
        "Total Payments: {}<br>Total Months: {}<br>Final Payment Amount: ${}<br>Total Interest: ${}",
        payoff.number_of_payments,
        format::count(payoff.number_of_months),
        format::whole_dollars(payoff.final_payment_amount),
        format::currency(payoff.total_interest),
    ))
}

fn estimate_text(form: &TermForm) -> Result<String, String> {
    let loan_amount = parse_decimal(&form.loan_amt, "loan_amt")?;
    let fee_amount = parse_decimal(&form.fee_amt, "fee_amt")?;
    let rate = parse_decimal(&form.interest_rate, "interest_rate")?;
    let unit = parse_whole(&form.unit_type, "unit_type", DEFAULT_TERM_UNIT as i64)?;
    let count = parse_whole(&form.unit_amt, "unit_amt", 0)?;

    let unit = u32::try_from(unit).map_err(|_| "unit_type is not a valid term unit".to_string())?;
    let payment = estimate_payment_amount(loan_amount, fee_amount, rate, unit, count)
        .map_err(|e| e.to_string())?;

    Ok(format!("Payment Amount: ${}", format::currency(payment)))
}

/// Empty and missing numeric fields parse as zero.
fn parse_decimal(raw: &Option<String>, field: &str) -> Result<Decimal, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Decimal::ZERO),
        Some(text) => text
            .parse()
            .map_err(|_| format!("{field} is not a valid number")),
    }
}

fn parse_whole(raw: &Option<String>, field: &str, default: i64) -> Result<i64, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| format!("{field} is not a valid whole number")),
    }
}

fn parse_frequency(raw: &Option<String>) -> Result<u32, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(DEFAULT_FREQUENCY),
        Some(text) => text
            .parse()
            .map_err(|_| "frequency is not a valid whole number".to_string()),
    }
}
