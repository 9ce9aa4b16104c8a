//! Duration shorthand conversion
//!
//! Detection content stores query windows as ISO 8601 durations (`PT5H`,
//! `P1D`). The exported YAML uses the compact shorthand (`5h`, `1d`).
//! Unrecognised input passes through unchanged in both directions.

use regex::Regex;
use std::sync::LazyLock;

/// Single-unit ISO 8601 duration: `P<n>D` or `PT<n>H|M|S`
static ISO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P(?:(\d+)D|T(\d+)([HMS]))$").unwrap());

/// Shorthand duration: `<n>d|h|m|s`, optional whitespace before the unit
static SHORTHAND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*([dhms])$").unwrap());

/// Convert an ISO 8601 duration to shorthand (`PT5H` -> `5h`)
pub fn iso_to_shorthand(iso: &str) -> String {
    let upper = iso.to_ascii_uppercase();
    let Some(caps) = ISO_REGEX.captures(&upper) else {
        return iso.to_string();
    };

    if let Some(days) = caps.get(1) {
        return format!("{}d", days.as_str());
    }
    match (caps.get(2), caps.get(3)) {
        (Some(num), Some(unit)) => format!("{}{}", num.as_str(), unit.as_str().to_ascii_lowercase()),
        _ => iso.to_string(),
    }
}

/// Convert shorthand or ISO 8601 input to ISO 8601 (`5h` -> `PT5H`)
///
/// Values already starting with `P` are upper-cased and returned as-is.
pub fn shorthand_to_iso(value: &str) -> String {
    let trimmed = value.trim().to_ascii_uppercase();

    if trimmed.starts_with('P') {
        return trimmed;
    }

    if let Some(caps) = SHORTHAND_REGEX.captures(&trimmed) {
        let num = &caps[1];
        let unit = caps[2].to_ascii_uppercase();
        if unit == "D" {
            return format!("P{num}D");
        }
        return format!("PT{num}{unit}");
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PT5H", "5h")]
    #[test_case("P1D", "1d")]
    #[test_case("PT30M", "30m")]
    #[test_case("PT45S", "45s")]
    #[test_case("pt2h", "2h")]
    #[test_case("P1DT2H", "P1DT2H" ; "compound passes through")]
    #[test_case("5h", "5h" ; "shorthand passes through")]
    fn test_iso_to_shorthand(input: &str, expected: &str) {
        assert_eq!(iso_to_shorthand(input), expected);
    }

    #[test_case("5h", "PT5H")]
    #[test_case("1d", "P1D")]
    #[test_case("7D", "P7D")]
    #[test_case("30m", "PT30M")]
    #[test_case(" 10 s ", "PT10S")]
    #[test_case("pt5h", "PT5H" ; "iso is upper cased")]
    #[test_case("soon", "soon" ; "unknown passes through")]
    fn test_shorthand_to_iso(input: &str, expected: &str) {
        assert_eq!(shorthand_to_iso(input), expected);
    }

    #[test]
    fn test_round_trip() {
        for iso in ["PT5H", "P1D", "PT30M", "PT15S", "P14D"] {
            assert_eq!(shorthand_to_iso(&iso_to_shorthand(iso)), iso);
        }
    }
}
