//! Duration token parsing and formatting.
//!
//! Session annotations carry a single whitespace-delimited duration token such
//! as `25m`, `90s`, `1h` or the compound `1h30m`. Units are hours, minutes and
//! seconds with their common long spellings, case-insensitive.

/// Parse a duration token into whole seconds.
///
/// Accepts one or more `<digits><unit>` components concatenated without
/// separators (`25m`, `1h30m`, `1h30m15s`). Returns `None` for anything else,
/// including a bare number with no unit.
pub fn parse_duration_token(token: &str) -> Option<u64> {
    let mut total_secs: u64 = 0;
    let mut components = 0;
    let mut chars = token.chars().peekable();

    while chars.peek().is_some() {
        let mut value: u64 = 0;
        let mut digits = 0;
        while let Some(c) = chars.peek() {
            let Some(d) = c.to_digit(10) else { break };
            value = value.checked_mul(10)?.checked_add(d as u64)?;
            digits += 1;
            chars.next();
        }
        if digits == 0 {
            return None;
        }

        let mut unit = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                unit.push(c.to_ascii_lowercase());
                chars.next();
            } else {
                break;
            }
        }

        let multiplier = match unit.as_str() {
            "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
            "m" | "min" | "mins" | "minute" | "minutes" => 60,
            "s" | "sec" | "secs" | "second" | "seconds" => 1,
            _ => return None,
        };

        total_secs = total_secs.checked_add(value.checked_mul(multiplier)?)?;
        components += 1;
    }

    if components == 0 { None } else { Some(total_secs) }
}

/// Format whole seconds compactly (`25m`, `1h30m`, `1m30s`).
///
/// Zero-valued components are omitted; a zero duration formats as `0s`.
pub fn format_duration(secs: u64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    if seconds > 0 {
        out.push_str(&format!("{}s", seconds));
    }
    out
}
