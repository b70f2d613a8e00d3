//! Quantity normalization: free-form quantity text → numeric value + unit.
//!
//! The normalizer is a pure function of the raw text. It recognizes a
//! short, fixed sequence of token shapes instead of one opaque regular
//! expression, so each edge case (locale decimal separators, unit-less
//! numbers, missing numbers) stays independently testable:
//!
//! ```text
//! quantity := integer [ ("." | ",") integer ] [ ws* unit ]
//! unit     := alphabetic+          (any script, lower-cased on output)
//! ```
//!
//! Text that does not lead with a number yields the empty result — the raw
//! string is still preserved and displayed elsewhere, no numeric reasoning
//! is attempted. Unit vocabulary validation and unit conversion are
//! explicitly out of scope.

use crate::models::Quantity;

/// Parse a leading numeric token and optional unit out of `raw`.
///
/// Never fails; absence of a match is an empty result, not an error.
///
/// ```
/// use olaf_core::quantity::normalize;
///
/// assert_eq!(normalize("2.5kg").value, Some(2.5));
/// assert_eq!(normalize("3,5 komada").unit.as_deref(), Some("komada"));
/// assert_eq!(normalize("abc").value, None);
/// ```
pub fn normalize(raw: &str) -> Quantity {
    let s = raw.trim_start();

    // Integer part. Digits are ASCII, so char count == byte length.
    let int_len = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if int_len == 0 {
        return Quantity::default();
    }

    let mut number = s[..int_len].to_string();
    let mut consumed = int_len;

    // Optional decimal separator, "." or ",", followed by at least one
    // digit. A trailing bare separator ("2,") is not part of the number.
    let rest = &s[consumed..];
    if let Some(sep) = rest.chars().next() {
        if sep == '.' || sep == ',' {
            let frac_len = rest[1..].chars().take_while(|c| c.is_ascii_digit()).count();
            if frac_len > 0 {
                number.push('.');
                number.push_str(&rest[1..1 + frac_len]);
                consumed += 1 + frac_len;
            }
        }
    }

    // The collected token is digits with at most one '.', so this parse
    // cannot fail in practice.
    let value = number.parse::<f64>().ok();

    // Optional unit: the alphabetic run after the number, lower-cased.
    // `is_alphabetic` covers accented characters (komada, čaša, ...).
    let after = s[consumed..].trim_start();
    let unit: String = after.chars().take_while(|c| c.is_alphabetic()).collect();
    let unit = if unit.is_empty() {
        None
    } else {
        Some(unit.to_lowercase())
    };

    Quantity { value, unit }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(raw: &str, value: Option<f64>, unit: Option<&str>) {
        let q = normalize(raw);
        assert_eq!(q.value, value, "value mismatch for {:?}", raw);
        assert_eq!(q.unit.as_deref(), unit, "unit mismatch for {:?}", raw);
    }

    #[test]
    fn test_decimal_point_with_attached_unit() {
        check("2.5kg", Some(2.5), Some("kg"));
    }

    #[test]
    fn test_decimal_comma_with_spaced_unit() {
        check("3,5 komada", Some(3.5), Some("komada"));
    }

    #[test]
    fn test_empty_input() {
        check("", None, None);
    }

    #[test]
    fn test_no_leading_number() {
        check("abc", None, None);
        check("pola kile", None, None);
    }

    #[test]
    fn test_integer_without_unit() {
        check("2", Some(2.0), None);
        check("  42  ", Some(42.0), None);
    }

    #[test]
    fn test_unit_is_lowercased() {
        check("5KG", Some(5.0), Some("kg"));
        check("1 L", Some(1.0), Some("l"));
    }

    #[test]
    fn test_accented_unit_characters() {
        check("2 čaše", Some(2.0), Some("čaše"));
        check("3 žlice", Some(3.0), Some("žlice"));
    }

    #[test]
    fn test_trailing_bare_separator_not_consumed() {
        // "2," is the number 2; the comma is not a decimal point, and it
        // also blocks unit extraction (the unit must directly follow the
        // number, modulo whitespace).
        check("2,", Some(2.0), None);
        check("2, kg", Some(2.0), None);
    }

    #[test]
    fn test_unit_run_stops_at_non_alphabetic() {
        check("2kg.", Some(2.0), Some("kg"));
        check("500g mljeveno", Some(500.0), Some("g"));
    }

    #[test]
    fn test_number_embedded_mid_text_is_not_a_match() {
        check("oko 3 kg", None, None);
    }
}
