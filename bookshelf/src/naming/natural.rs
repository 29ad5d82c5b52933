//! Natural ("human") string ordering.
//!
//! Digit runs are compared by numeric value, everything else
//! case-insensitively, so `Kapitel_2` sorts before `Kapitel_10`.

use std::cmp::Ordering;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Split into maximal ASCII-digit runs and maximal non-digit runs.
fn split_parts(s: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        if let Some(prev) = current
            && prev != is_digit
        {
            parts.push(make_part(&s[start..idx], prev));
            start = idx;
        }
        current = Some(is_digit);
    }

    if let Some(prev) = current {
        parts.push(make_part(&s[start..], prev));
    }

    parts
}

fn make_part(slice: &str, digits: bool) -> Part<'_> {
    if digits {
        Part::Digits(slice)
    } else {
        Part::Text(slice)
    }
}

/// Compare two digit runs by value, without any width limit.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase))
}

fn raw(part: Part<'_>) -> &str {
    match part {
        Part::Digits(s) | Part::Text(s) => s,
    }
}

/// Natural comparison of two strings.
///
/// # Examples
///
/// ```
/// use bookshelf::naming::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("Kapitel_2", "Kapitel_10"), Ordering::Less);
/// assert_eq!(natural_cmp("file100", "file10"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = split_parts(a);
    let right = split_parts(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Part::Digits(x), Part::Digits(y)) => compare_digits(x, y),
            _ => compare_text(raw(*l), raw(*r)),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}

/// Natural comparison where an absent value sorts before any present one.
pub fn compare_natural(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => natural_cmp(a, b),
    }
}

/// [`compare_natural`] as a `-1 / 0 / 1` integer.
pub fn compare_natural_sign(a: Option<&str>, b: Option<&str>) -> i32 {
    match compare_natural(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Natural comparison of the final path components.
pub fn file_name_cmp(a: &Path, b: &Path) -> Ordering {
    let a = a.file_name().map(|n| n.to_string_lossy());
    let b = b.file_name().map(|n| n.to_string_lossy());
    compare_natural(a.as_deref(), b.as_deref())
}
