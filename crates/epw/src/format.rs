//! Number formatting shared by the header and record writers.

/// Formats a value the way EPW files store it: integers without a decimal
/// point, everything else in shortest round-trip form.
pub(crate) fn format_number(v: f64) -> String {
    if v == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{v}")
}
