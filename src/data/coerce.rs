use chrono::{DateTime, NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Numeric coercion for locale-formatted text ("120 000 км", "3,500,000 ₸")
// ---------------------------------------------------------------------------

/// Parse a locale-formatted number, dropping grouping separators and any
/// leading/trailing unit or currency token.
///
/// Whitespace of every kind (including NBSP and narrow NBSP) and commas are
/// treated as thousands separators.  The number starts at the first digit;
/// a `-` directly before it is kept.  A lone leading `.` (".5") is ambiguous
/// and gives `None`, while a dot closing an abbreviation ("ок.", "тг.") is
/// dropped with it.  Returns `None` when nothing numeric is left, e.g. for
/// `""` or `"N/A"`.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let first_digit = compact.find(|c: char| c.is_ascii_digit())?;
    let (prefix, rest) = compact.split_at(first_digit);

    if matches!(prefix, "." | "-.") {
        return None;
    }
    let negative = prefix.ends_with('-');

    let digits = rest.trim_end_matches(|c: char| !c.is_ascii_digit());
    let value = digits.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}

/// Strip any of `tokens` from the end of `raw`, repeatedly, ignoring case.
fn strip_unit_suffixes<'a>(raw: &'a str, tokens: &[&str]) -> &'a str {
    let mut s = raw.trim_end();
    while let Some(cut) = tokens.iter().find_map(|tok| suffix_start(s, tok)) {
        s = s[..cut].trim_end();
    }
    s
}

/// Byte offset where `token` (lowercase) starts as a case-insensitive suffix of `s`.
fn suffix_start(s: &str, token: &str) -> Option<usize> {
    let n = token.chars().count();
    let (start, _) = s.char_indices().rev().nth(n.checked_sub(1)?)?;
    (s[start..].to_lowercase() == token).then_some(start)
}

const MILEAGE_UNITS: &[&str] = &["км", "km"];

const CURRENCY_TOKENS: &[&str] = &["₸", "тг", "тнг", "kzt"];

/// Mileage text such as `"120 000 км"` or `"85,000 km"`.
pub fn coerce_mileage(raw: &str) -> Option<f64> {
    coerce_numeric(strip_unit_suffixes(raw, MILEAGE_UNITS))
}

/// Price text such as `"3 500 000 ₸"`, `"3500000 тг"` or `"3,500,000 KZT"`.
/// Both the currency symbol and a letter code may be present at once.
pub fn coerce_price(raw: &str) -> Option<f64> {
    coerce_numeric(strip_unit_suffixes(raw, CURRENCY_TOKENS))
}

// ---------------------------------------------------------------------------
// Publication dates
// ---------------------------------------------------------------------------

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a publication timestamp in any of the common textual layouts.
///
/// Timezone-aware values keep their wall-clock time and drop the offset, so
/// every result is comparable with a naive local "now".
pub fn parse_published(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Whole days elapsed between `published` and `now`, floored.
pub fn days_between(published: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - published).num_seconds().div_euclid(86_400)
}

/// Years outside this range are treated as data-entry errors.
pub const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Parse an integer year cell; tolerates a trailing `.0` from spreadsheet exports.
pub fn coerce_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    let year = match s.parse::<i64>() {
        Ok(y) => i32::try_from(y).ok()?,
        Err(_) => {
            let v = s.parse::<f64>().ok()?;
            if !v.is_finite() || v.fract() != 0.0 || v.abs() > f64::from(i32::MAX) {
                return None;
            }
            v as i32
        }
    };
    PLAUSIBLE_YEARS.contains(&year).then_some(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_grouping_and_units() {
        assert_eq!(coerce_price("3,500,000 ₸"), Some(3_500_000.0));
        assert_eq!(coerce_price("3 500 000 ₸"), Some(3_500_000.0));
        assert_eq!(coerce_price("3\u{a0}500\u{a0}000 тг"), Some(3_500_000.0));
        assert_eq!(coerce_price("3 500 000 ₸ KZT"), Some(3_500_000.0));
        assert_eq!(coerce_mileage("120 000 km"), Some(120_000.0));
        assert_eq!(coerce_mileage("120 000 км"), Some(120_000.0));
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(coerce_numeric("42"), Some(42.0));
        assert_eq!(coerce_numeric("1234.5"), Some(1234.5));
        assert_eq!(coerce_numeric("  7 "), Some(7.0));
    }

    #[test]
    fn garbage_is_missing() {
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("N/A"), None);
        assert_eq!(coerce_numeric("км"), None);
        assert_eq!(coerce_numeric("..."), None);
        assert_eq!(coerce_numeric("1.2.3"), None);
        assert_eq!(coerce_numeric(".5"), None);
        assert_eq!(coerce_numeric("12abc34"), None);
    }

    #[test]
    fn leading_abbreviations_are_not_fractions() {
        assert_eq!(coerce_price("ок. 3 500 000 ₸"), Some(3_500_000.0));
        assert_eq!(coerce_price("тг.1 000"), Some(1_000.0));
        assert_eq!(coerce_price("KZT 2 000 000"), Some(2_000_000.0));
        assert_eq!(coerce_mileage("пробег: 85 000 км"), Some(85_000.0));
        assert_eq!(coerce_numeric("-5"), Some(-5.0));
        assert_eq!(coerce_numeric("$-12.5"), Some(-12.5));
    }

    #[test]
    fn unit_tokens_are_field_specific() {
        assert_eq!(coerce_price("4 200 000 KZT"), Some(4_200_000.0));
        assert_eq!(coerce_price("4 200 000 ₸ тг"), Some(4_200_000.0));
        assert_eq!(coerce_mileage("85 000 KM"), Some(85_000.0));
        assert_eq!(coerce_mileage("85 000 км."), Some(85_000.0));
        assert_eq!(strip_unit_suffixes("1 000 ₸ KZT", CURRENCY_TOKENS), "1 000");
        assert_eq!(strip_unit_suffixes("1 000 км", CURRENCY_TOKENS), "1 000 км");
        assert_eq!(strip_unit_suffixes("5 \u{212a}M", MILEAGE_UNITS), "5");
    }

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_published("2024-07-01 10:30:00"), Some(expected));
        assert_eq!(parse_published("2024-07-01T10:30:00"), Some(expected));
        assert_eq!(parse_published("2024-07-01T10:30:00+05:00"), Some(expected));
        assert_eq!(parse_published("2024-07-01 10:30:00+0500"), Some(expected));
        assert_eq!(parse_published("01.07.2024 10:30"), Some(expected));

        let midnight = expected.date().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_published("2024-07-01"), Some(midnight));
        assert_eq!(parse_published("01.07.2024"), Some(midnight));
    }

    #[test]
    fn invalid_dates_are_missing() {
        assert_eq!(parse_published(""), None);
        assert_eq!(parse_published("yesterday"), None);
        assert_eq!(parse_published("2024-13-45"), None);
    }

    #[test]
    fn days_are_floored() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let later = start + chrono::Duration::hours(36);
        assert_eq!(days_between(start, later), 1);
        let earlier = start - chrono::Duration::hours(1);
        assert_eq!(days_between(start, earlier), -1);
    }

    #[test]
    fn years_accept_float_exports() {
        assert_eq!(coerce_year("2019"), Some(2019));
        assert_eq!(coerce_year("2019.0"), Some(2019));
        assert_eq!(coerce_year("2019.5"), None);
        assert_eq!(coerce_year(""), None);
    }

    #[test]
    fn out_of_range_years_are_missing() {
        assert_eq!(coerce_year("99999999999"), None);
        assert_eq!(coerce_year("3e9"), None);
        assert_eq!(coerce_year("-2019"), None);
        assert_eq!(coerce_year("0"), None);
        assert_eq!(coerce_year("1e400"), None);
        assert_eq!(coerce_year("1900"), Some(1900));
        assert_eq!(coerce_year("2100.0"), Some(2100));
    }
}
