//! Result formatting module.
//!
//! Decides how a raw input string is presented: nothing yet, an input
//! error, or a localized number. Bad input is data here, never an error,
//! so the UI can show a translated message without special handling.
//!
//! Numbers are rendered with thousands grouping, no fraction digits when
//! the value is whole, and otherwise between 2 and 8 fraction digits.
//! Rounding works on the shortest decimal form of the value, half away
//! from zero, so `0.123456785` shows as `0.12345679`.

use serde::{Deserialize, Serialize};

/// Most fraction digits ever shown.
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Fewest fraction digits shown for a non-whole value.
pub const MIN_FRACTION_DIGITS: usize = 2;

/// Display language of a calculator view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Uk,
    Ru,
}

impl Locale {
    /// Parse a language code or tag such as `"en"`, `"uk-UA"` or `"ru_RU"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use boostcalc::Locale;
    ///
    /// assert_eq!(Locale::from_tag("uk-UA"), Some(Locale::Uk));
    /// assert_eq!(Locale::from_tag("RU"), Some(Locale::Ru));
    /// assert_eq!(Locale::from_tag("de"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Some(Locale::En),
            "uk" => Some(Locale::Uk),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Uk => "uk",
            Locale::Ru => "ru",
        }
    }

    /// Thousands separator.
    pub fn group_separator(self) -> char {
        match self {
            Locale::En => ',',
            Locale::Uk | Locale::Ru => '\u{a0}',
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            Locale::En => '.',
            Locale::Uk | Locale::Ru => ',',
        }
    }
}

/// What the result panel should show for a raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormatResult {
    /// Nothing entered: no error, result hidden.
    Empty,
    /// Not a finite number: error shown, result hidden.
    Invalid,
    /// A formatted final value.
    Ok { text: String },
}

impl FormatResult {
    pub fn text(&self) -> Option<&str> {
        match self {
            FormatResult::Ok { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FormatResult::Invalid)
    }
}

/// Parse a raw input into a finite base value.
///
/// Surrounding whitespace is ignored. `inf` and `NaN` are rejected.
pub fn parse_base(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse `raw`, run `evaluate` on it and format the result.
///
/// # Examples
///
/// ```rust
/// use boostcalc::{format_input, FormatResult, Locale};
///
/// assert_eq!(format_input("   ", Locale::En, |b| b), FormatResult::Empty);
/// assert_eq!(format_input("abc", Locale::En, |b| b), FormatResult::Invalid);
/// assert_eq!(format_input("1234.5", Locale::En, |b| b * 2.0).text(), Some("2,469"));
/// assert_eq!(format_input("10", Locale::En, |b| b * 3.15).text(), Some("31.50"));
/// ```
pub fn format_input<F>(raw: &str, locale: Locale, evaluate: F) -> FormatResult
where
    F: FnOnce(f64) -> f64,
{
    if raw.trim().is_empty() {
        return FormatResult::Empty;
    }
    match parse_base(raw) {
        Some(base) => FormatResult::Ok {
            text: format_value(evaluate(base), locale),
        },
        None => FormatResult::Invalid,
    }
}

/// Format a value for display.
///
/// # Examples
///
/// ```rust
/// use boostcalc::{format_value, Locale};
///
/// assert_eq!(format_value(0.0, Locale::En), "0");
/// assert_eq!(format_value(1234567.0, Locale::En), "1,234,567");
/// assert_eq!(format_value(0.1 + 0.2, Locale::En), "0.30");
/// assert_eq!(format_value(1234.123456789, Locale::Uk), "1\u{a0}234,12345679");
/// ```
pub fn format_value(value: f64, locale: Locale) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude.is_infinite() {
        return format!("{}∞", sign);
    }
    if magnitude.is_nan() {
        return "NaN".to_string();
    }

    let min_digits = if magnitude.fract() == 0.0 {
        0
    } else {
        MIN_FRACTION_DIGITS
    };

    let fixed = round_shortest(magnitude, MAX_FRACTION_DIGITS);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = trim_fraction(fraction, min_digits);

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    out.push_str(sign);
    out.push_str(&group_digits(integer, locale.group_separator()));
    if !fraction.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

/// `magnitude` with exactly `digits` fraction digits.
///
/// Rounds the shortest decimal form that reads back as `magnitude`, half
/// away from zero. Integers past 2^53 keep only their shortest digits and
/// are padded with zeros.
fn round_shortest(magnitude: f64, digits: usize) -> String {
    let scientific = format!("{:e}", magnitude);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let significant: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let point = exponent.parse::<i64>().unwrap_or(0) + 1;

    let (integer, mut fraction) = if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), zeros + &significant)
    } else {
        let point = point as usize;
        if point >= significant.len() {
            let zeros = "0".repeat(point - significant.len());
            (significant + &zeros, String::new())
        } else {
            let (integer, fraction) = significant.split_at(point);
            (integer.to_string(), fraction.to_string())
        }
    };

    let round_up = fraction.as_bytes().get(digits).is_some_and(|d| *d >= b'5');
    fraction.truncate(digits);
    while fraction.len() < digits {
        fraction.push('0');
    }

    let mut fixed = if digits == 0 {
        integer
    } else {
        format!("{}.{}", integer, fraction)
    };
    if round_up {
        increment_decimal(&mut fixed);
    }
    fixed
}

/// Add one unit in the last place of a plain decimal string.
fn increment_decimal(digits: &mut String) {
    let mut bytes = std::mem::take(digits).into_bytes();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        match *b {
            b'.' => continue,
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }
    *digits = String::from_utf8(bytes).unwrap_or_default();
}

fn trim_fraction(fraction: &str, min_digits: usize) -> &str {
    let significant = fraction.trim_end_matches('0').len();
    &fraction[..significant.max(min_digits).min(fraction.len())]
}

fn group_digits(integer: &str, separator: char) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(format_input("", Locale::En, |b| b), FormatResult::Empty);
        assert_eq!(format_input(" \t", Locale::En, |b| b), FormatResult::Empty);
        assert_eq!(format_input("abc", Locale::En, |b| b), FormatResult::Invalid);
        assert_eq!(format_input("12abc", Locale::En, |b| b), FormatResult::Invalid);
        assert_eq!(format_input("inf", Locale::En, |b| b), FormatResult::Invalid);
        assert_eq!(format_input("NaN", Locale::En, |b| b), FormatResult::Invalid);
        assert_eq!(format_input("1e400", Locale::En, |b| b), FormatResult::Invalid);
    }

    #[test]
    fn test_parse_base() {
        assert_eq!(parse_base(" 42 "), Some(42.0));
        assert_eq!(parse_base(".5"), Some(0.5));
        assert_eq!(parse_base("-1e3"), Some(-1000.0));
        assert_eq!(parse_base("1,000"), None);
    }

    #[test]
    fn test_whole_numbers_have_no_fraction() {
        assert_eq!(format_value(0.0, Locale::En), "0");
        assert_eq!(format_value(999.0, Locale::En), "999");
        assert_eq!(format_value(1000.0, Locale::En), "1,000");
        assert_eq!(format_value(-1234567.0, Locale::En), "-1,234,567");
        assert_eq!(format_value(1e20, Locale::En), "100,000,000,000,000,000,000");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(format_value(31.5, Locale::En), "31.50");
        assert_eq!(format_value(0.125, Locale::En), "0.125");
        assert_eq!(format_value(1.0 / 3.0, Locale::En), "0.33333333");
        assert_eq!(format_value(2.000000001, Locale::En), "2.00");
        assert_eq!(format_value(0.999999999, Locale::En), "1.00");
    }

    #[test]
    fn test_ties_round_up() {
        assert_eq!(format_value(0.001953125, Locale::En), "0.00195313");
        assert_eq!(round_shortest(0.5, 0), "1");
        assert_eq!(round_shortest(2.5, 0), "3");
        assert_eq!(round_shortest(9.5, 0), "10");
        assert_eq!(round_shortest(0.25, 1), "0.3");
    }

    #[test]
    fn test_rounds_shortest_decimal_form() {
        // The first three sit just below the tie in binary.
        assert_eq!(format_value(0.123456785, Locale::En), "0.12345679");
        assert_eq!(format_value(1.000000005, Locale::En), "1.00000001");
        assert_eq!(format_value(12.345678905, Locale::En), "12.34567891");
        assert_eq!(format_value(0.000000004, Locale::En), "0.00");
        assert_eq!(format_value(0.000000005, Locale::En), "0.00000001");
    }

    #[test]
    fn test_large_integers_use_shortest_digits() {
        assert_eq!(
            format_value(1152921504606846976.0, Locale::En),
            "1,152,921,504,606,847,000"
        );
        assert_eq!(format_value(9007199254740993.0, Locale::En), "9,007,199,254,740,992");
        // 301 digits and 100 separators.
        assert_eq!(format_value(1.5e300, Locale::En).len(), 401);
    }

    #[test]
    fn test_increment_decimal_carries() {
        let mut s = String::from("99.99");
        increment_decimal(&mut s);
        assert_eq!(s, "100.00");
    }

    #[test]
    fn test_locales() {
        assert_eq!(format_value(1234567.891, Locale::En), "1,234,567.891");
        assert_eq!(format_value(1234567.891, Locale::Uk), "1\u{a0}234\u{a0}567,891");
        assert_eq!(format_value(1234567.891, Locale::Ru), "1\u{a0}234\u{a0}567,891");
        assert_eq!(format_value(12.5, Locale::Ru), "12,50");
    }

    #[test]
    fn test_sign_and_overflow() {
        assert_eq!(format_value(-0.5, Locale::En), "-0.50");
        assert_eq!(format_value(f64::INFINITY, Locale::En), "∞");
        assert_eq!(format_value(f64::NEG_INFINITY, Locale::En), "-∞");
    }

    #[test]
    fn test_result_serializes_with_kind_tag() {
        let ok = FormatResult::Ok { text: "0".to_string() };
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"kind":"ok","text":"0"}"#);
        assert_eq!(
            serde_json::to_string(&FormatResult::Empty).unwrap(),
            r#"{"kind":"empty"}"#
        );
    }
}
