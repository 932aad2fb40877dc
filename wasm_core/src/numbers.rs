// Number-base conversion and CSS length (px ↔ em/rem) helpers.
use num_bigint::BigInt;

/// Converts `value` written in `from_radix` into `to_radix`, uppercase digits.
///
/// Underscore separators, a sign and the `0b` / `0o` / `0x` prefix matching the
/// source radix are accepted. Values are arbitrary precision.
///
/// # Example
/// ```
/// use devtoolkit_core::numbers::convert_base;
/// assert_eq!(convert_base("255", 10, 16)?, "FF");
/// assert_eq!(convert_base("0b1010", 2, 10)?, "10");
/// # Ok::<(), String>(())
/// ```
pub fn convert_base(value: &str, from_radix: u32, to_radix: u32) -> Result<String, String> {
    check_radix(from_radix)?;
    check_radix(to_radix)?;
    let num = parse_number(value, from_radix)?;
    Ok(num.to_str_radix(to_radix).to_uppercase())
}

fn check_radix(radix: u32) -> Result<(), String> {
    if !(2..=36).contains(&radix) {
        return Err(format!("unsupported base {radix}"));
    }
    Ok(())
}

fn parse_number(value: &str, radix: u32) -> Result<BigInt, String> {
    let cleaned = value.trim().replace('_', "");
    let mut slice = cleaned.as_str();
    let mut negative = false;
    if let Some(rest) = slice.strip_prefix('-') {
        negative = true;
        slice = rest;
    } else if let Some(rest) = slice.strip_prefix('+') {
        slice = rest;
    }
    let prefix = match radix {
        2 => Some(["0b", "0B"]),
        8 => Some(["0o", "0O"]),
        16 => Some(["0x", "0X"]),
        _ => None,
    };
    if let Some(rest) = prefix.and_then(|[lower, upper]| {
        slice.strip_prefix(lower).or_else(|| slice.strip_prefix(upper))
    }) {
        slice = rest;
    }
    if slice.is_empty() {
        return Err("value is empty".into());
    }
    // parse_bytes takes its own sign; only one is allowed, and it goes first.
    if slice.starts_with(['+', '-']) {
        return Err("Invalid input for selected base".into());
    }
    let mut num = BigInt::parse_bytes(slice.as_bytes(), radix)
        .ok_or_else(|| "Invalid input for selected base".to_string())?;
    if negative {
        num = -num;
    }
    Ok(num)
}

/// Converts pixels into em/rem: `px / base`, four decimals, trailing zeros trimmed.
///
/// # Example
/// ```
/// use devtoolkit_core::numbers::px_to_relative;
/// assert_eq!(px_to_relative(24.0, 16.0)?, "1.5");
/// assert_eq!(px_to_relative(10.0, 16.0)?, "0.625");
/// # Ok::<(), String>(())
/// ```
pub fn px_to_relative(px: f64, base: f64) -> Result<String, String> {
    check_base(base)?;
    Ok(trim_fixed(px / base, 4))
}

/// Converts em/rem into pixels: `value * base`, two decimals, trailing zeros trimmed.
pub fn relative_to_px(value: f64, base: f64) -> Result<String, String> {
    check_base(base)?;
    Ok(trim_fixed(value * base, 2))
}

/// Parses the textual field the same way both unit pages do.
pub fn convert_css_length(value: &str, base: f64, to_px: bool) -> Result<String, String> {
    let parsed: f64 = value
        .trim()
        .trim_end_matches(|ch: char| ch.is_ascii_alphabetic())
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", value.trim()))?;
    if to_px {
        relative_to_px(parsed, base)
    } else {
        px_to_relative(parsed, base)
    }
}

fn check_base(base: f64) -> Result<(), String> {
    if !base.is_finite() || base <= 0.0 {
        return Err("base font size must be a positive number".into());
    }
    Ok(())
}

fn trim_fixed(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_common_bases() {
        assert_eq!(convert_base("100", 10, 2).unwrap(), "1100100");
        assert_eq!(convert_base("100", 10, 8).unwrap(), "144");
        assert_eq!(convert_base("ff", 16, 10).unwrap(), "255");
        assert_eq!(convert_base("0xFF", 16, 2).unwrap(), "11111111");
        assert_eq!(convert_base("-1_000", 10, 16).unwrap(), "-3E8");
    }

    #[test]
    fn handles_values_beyond_u64() {
        assert_eq!(
            convert_base("FFFFFFFFFFFFFFFFFFFF", 16, 10).unwrap(),
            "1208925819614629174706175"
        );
    }

    #[test]
    fn rejects_invalid_digits_and_bases() {
        assert!(convert_base("102", 2, 10).is_err());
        assert!(convert_base("", 10, 2).is_err());
        assert!(convert_base("0x", 16, 2).is_err());
        assert!(convert_base("10", 1, 2).is_err());
    }

    #[test]
    fn rejects_repeated_signs() {
        for input in ["--5", "+-5", "-+5", "++5"] {
            assert!(convert_base(input, 10, 2).is_err(), "{input}");
        }
        assert!(convert_base("-0x-f", 16, 10).is_err());
        assert_eq!(convert_base("-5", 10, 2).unwrap(), "-101");
        assert_eq!(convert_base("+5", 10, 2).unwrap(), "101");
    }

    #[test]
    fn css_lengths_round_nicely() {
        assert_eq!(px_to_relative(16.0, 16.0).unwrap(), "1");
        assert_eq!(px_to_relative(1.0, 3.0).unwrap(), "0.3333");
        assert_eq!(relative_to_px(1.25, 16.0).unwrap(), "20");
        assert_eq!(relative_to_px(0.333, 16.0).unwrap(), "5.33");
        assert_eq!(px_to_relative(0.0, 16.0).unwrap(), "0");
        assert!(px_to_relative(1.0, 0.0).is_err());
    }

    #[test]
    fn css_length_text_accepts_units() {
        assert_eq!(convert_css_length("24px", 16.0, false).unwrap(), "1.5");
        assert_eq!(convert_css_length("2rem", 16.0, true).unwrap(), "32");
        assert!(convert_css_length("abc", 16.0, true).is_err());
    }
}
