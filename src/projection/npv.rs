//! Net present value of annual cash flows
//!
//! Cash flows are end-of-year: the flow for projection year `y` (index
//! `y - 1`) is discounted by `(1 + rate)^y`.

use crate::error::{AnalysisError, AnalysisResult};

/// NPV of `cashflows` starting from an amount already spent or received at time 0
///
/// # Arguments
/// * `initial` - Time-0 amount (e.g. a negative up-front cost)
/// * `cashflows` - Annual flows, index 0 = year 1
/// * `rate` - Annual discount rate as a decimal
///
/// Accumulates in year order so the result matches a running sum taken
/// inside the projection loop.
pub fn net_present_value(initial: f64, cashflows: &[f64], rate: f64) -> AnalysisResult<f64> {
    if !(rate > -1.0) {
        return Err(AnalysisError::InvalidDiscountRate { rate: rate * 100.0 });
    }

    Ok(cashflows
        .iter()
        .enumerate()
        .fold(initial, |npv, (t, &cf)| npv + cf / (1.0 + rate).powi(t as i32 + 1)))
}
