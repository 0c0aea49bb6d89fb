//! Kilometre-post parsing for linear references along the pipeline route.

/// Parse a KP reference into kilometres.
///
/// Accepts chainage notation (`12+350`, `KP 12+350`) and plain decimal
/// kilometres (`12.35`). Returns `None` for anything unparseable.
pub fn parse_kp(raw: &str) -> Option<f64> {
    let mut text = raw.trim();
    if let Some(prefix) = text.get(..2)
        && prefix.eq_ignore_ascii_case("kp")
    {
        text = text[2..].trim_start_matches([' ', ':']).trim();
    }
    if text.is_empty() {
        return None;
    }
    if let Some((km, metres)) = text.split_once('+') {
        let km: f64 = km.trim().parse().ok()?;
        let metres: f64 = metres.trim().parse().ok()?;
        if !metres.is_finite() || metres < 0.0 {
            return None;
        }
        let value = km + metres / 1000.0;
        value.is_finite().then_some(value)
    } else {
        text.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

/// Format kilometres back into chainage notation (`12+350`).
pub fn format_kp(km: f64) -> String {
    let whole = km.trunc() as i64;
    let metres = (km.fract().abs() * 1000.0).round() as i64;
    format!("{whole}+{metres:03}")
}
