use super::MaybeFloat;

/// Format an evaluation result for display. Errors show as their token.
pub fn format_value(value: &MaybeFloat) -> String {
    match value {
        Ok(n) => format_number(*n),
        Err(e) => e.to_string(),
    }
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        String::from(if n > 0.0 { "inf" } else { "-inf" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{:.3}", n)
    }
}
