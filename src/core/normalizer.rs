use crate::models::{Place, RawPlaceRow};

/// Designation words the Census appends to place names
const DESIGNATIONS: [&str; 5] = ["city", "town", "CDP", "village", "borough"];

/// Turn raw Census rows into places
///
/// Rows without a positive population or without a name are dropped.
/// Row order is preserved and nothing is de-duplicated: the same display
/// name can legitimately appear twice within a state.
pub fn normalize(rows: &[RawPlaceRow]) -> Vec<Place> {
    rows.iter().filter_map(normalize_row).collect()
}

/// Normalize a single row, or `None` if it cannot become a place
pub fn normalize_row(row: &RawPlaceRow) -> Option<Place> {
    let official_name = row.name.trim();
    if official_name.is_empty() {
        return None;
    }

    let population = parse_leading_int(&row.population)
        .filter(|p| *p > 0)
        .map(|p| p as u64)?;

    let median_household_income = parse_leading_int(&row.income)
        .filter(|i| *i > 0)
        .map(|i| i as u64);

    Some(Place {
        official_name: row.name.clone(),
        display_name: display_name(official_name),
        population,
        median_household_income,
    })
}

/// Short name for a place: the part before the first comma, without the
/// trailing designation word
///
/// A name that consists only of a designation word keeps that word, so the
/// result is empty only when the pre-comma segment is.
pub fn display_name(official_name: &str) -> String {
    let segment = official_name.split(',').next().unwrap_or_default().trim();
    let stripped = strip_designation(segment).trim();

    if stripped.is_empty() {
        segment.to_string()
    } else {
        stripped.to_string()
    }
}

fn strip_designation(segment: &str) -> &str {
    match segment.rsplit_once(char::is_whitespace) {
        Some((head, last)) if DESIGNATIONS.iter().any(|d| d.eq_ignore_ascii_case(last)) => head,
        _ => segment,
    }
}

/// Parse the leading integer of a string
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is ignored, so `"12.7"` reads as 12. Returns `None` when there are no
/// digits or the value does not fit.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    rest[..digits_end].parse::<i64>().ok().map(|n| n * sign)
}
