//! Engineering-notation rendering of elapsed durations

/// Renders a nanosecond count in scientific notation with the exponent
/// constrained to a multiple of three.
///
/// Zero renders as `0.0e0`. Every other value renders with exactly three
/// digits after the decimal point, followed by `e` and the bare exponent:
/// `1500` becomes `1.500e3`, `999` stays `999.000e0`.
///
/// The input is an unsigned count (what [`std::time::Duration::as_nanos`]
/// produces), so negative durations are unrepresentable here.
pub fn format_engineering(elapsed_ns: u128) -> String {
    if elapsed_ns == 0 {
        return "0.0e0".to_string();
    }

    // ilog10 is floor(log10), so integer division by 3 lands on the
    // nearest SI-aligned exponent at or below the value's magnitude.
    let exp3 = (elapsed_ns.ilog10() / 3) * 3;
    let scaled = elapsed_ns as f64 / 10f64.powi(exp3 as i32);
    format!("{:.3}e{}", scaled, exp3)
}
