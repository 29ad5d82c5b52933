//! Helpers shared by the naming classifiers.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Value used when a number or numeral cannot be parsed.
///
/// Padded keys built from it sort after every real number.
pub const SENTINEL: u32 = u32::MAX;

/// Key used for list-based sections when no list entry matches.
pub const UNLISTED_KEY: &str = "9999";

/// A parenthesized counter right before the extension, e.g. `Foo(1).pdf`.
static DUPLICATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\d+\)\.[^.]+$").expect("valid duplicate suffix regex"));

/// Final path component as an owned string.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File names of every path, in input order.
pub fn file_names(files: &[PathBuf]) -> Vec<String> {
    files.iter().map(|path| file_name(path)).collect()
}

/// Case-insensitive substring test (Unicode aware).
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when `name` contains any of `terms`.
pub fn contains_any(name: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| contains_ignore_case(name, term))
}

/// Whether a file name looks like an OS-generated copy (`name(1).pdf`).
pub fn is_duplicate(name: &str) -> bool {
    DUPLICATE_SUFFIX.is_match(name)
}

/// Drop duplicate copies, keeping the relative order of the rest.
pub fn filter_duplicates(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|path| !is_duplicate(&file_name(path)))
        .cloned()
        .collect()
}

/// Zero-pad a number to four digits.
pub fn pad(value: u32) -> String {
    format!("{value:04}")
}

/// Position of the first matching term, padded, or [`UNLISTED_KEY`].
pub fn list_position(name: &str, terms: &[&str]) -> String {
    terms
        .iter()
        .position(|term| contains_ignore_case(name, term))
        .map(|idx| pad(idx as u32))
        .unwrap_or_else(|| UNLISTED_KEY.to_string())
}

/// First capture group of `pattern` parsed as a number.
///
/// Returns [`SENTINEL`] when there is no match or the digits overflow.
pub fn capture_number(pattern: &Regex, name: &str) -> u32 {
    pattern
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(SENTINEL)
}

/// First capture group of `pattern`, uppercased.
pub fn capture_letter(pattern: &Regex, name: &str) -> Option<String> {
    pattern
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

/// Decode a Roman numeral using subtractive notation.
///
/// Any character outside `IVXLCDM` (either case) yields [`SENTINEL`].
///
/// ```
/// use bookshelf::naming::util::{roman_to_int, SENTINEL};
///
/// assert_eq!(roman_to_int("XIV"), 14);
/// assert_eq!(roman_to_int("MCMXCIV"), 1994);
/// assert_eq!(roman_to_int("IIZ"), SENTINEL);
/// ```
pub fn roman_to_int(numeral: &str) -> u32 {
    if numeral.is_empty() {
        return SENTINEL;
    }

    let mut total: i64 = 0;
    let mut previous: i64 = 0;

    for ch in numeral.chars().rev() {
        let value = match ch.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return SENTINEL,
        };

        if value < previous {
            total -= value;
        } else {
            total += value;
        }
        previous = value;
    }

    u32::try_from(total).unwrap_or(SENTINEL)
}

/// Decode either an Arabic or a Roman numeral.
pub fn parse_numeral(numeral: &str) -> u32 {
    if !numeral.is_empty() && numeral.chars().all(|c| c.is_ascii_digit()) {
        numeral.parse().unwrap_or(SENTINEL)
    } else {
        roman_to_int(numeral)
    }
}
