/// Format a USD cost with five decimals (`$0.00042`)
///
/// Absent or non-finite costs render as an empty string so a missing value
/// is never mistaken for a free run.
pub fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(amount) if amount.is_finite() => {
            if amount < 0.0 {
                format!("-${:.5}", amount.abs())
            } else {
                format!("${:.5}", amount)
            }
        }
        _ => String::new(),
    }
}
