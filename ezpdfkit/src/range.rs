//! Page range parsing.
//!
//! Turns user text such as `"1,3-5,8"` into a [`PageSet`]: the ascending,
//! duplicate-free pages that survived validation against a document's page
//! count, plus every raw token that did not.
//!
//! Parsing is best-effort. A bad token never fails the whole text; it is
//! recorded in [`PageSet::rejected`] and the remaining tokens are still used.
//!
//! # Examples
//!
//! ```
//! use ezpdfkit::range::parse;
//!
//! let set = parse("0,3-5,99", 10);
//! assert_eq!(set.pages(), &[3, 4, 5]);
//! assert_eq!(set.rejected(), &["0", "99"]);
//! ```

use serde::Serialize;
use std::collections::BTreeSet;
use std::num::IntErrorKind;

/// One comma separated unit of range text, before clamping.
///
/// Both forms are 1-based. Values are kept signed so that `0` and negative
/// numbers survive tokenizing and can be rejected with the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageToken {
    /// A single page, e.g. `8`.
    Single(i64),
    /// An inclusive range, e.g. `3-5`.
    Range(i64, i64),
}

impl PageToken {
    /// Parse the syntax of one whitespace-free token.
    ///
    /// A token containing `-` is a range split at the first `-`; anything
    /// else is a single page. Returns `None` when a part is not an integer.
    /// Integers too large for `i64` saturate, so they are still clamped or
    /// rejected by bounds rather than by syntax.
    pub fn parse(token: &str) -> Option<Self> {
        match token.split_once('-') {
            Some((start, end)) => Some(Self::Range(parse_int(start)?, parse_int(end)?)),
            None => parse_int(token).map(Self::Single),
        }
    }

    /// Resolve the token against a document of `total_pages` pages.
    ///
    /// Ranges are clamped to the document. A range is only rejected for
    /// being out of bounds when *both* ends lie past the last page; a range
    /// that starts past the end but finishes inside it is rejected later
    /// because its clamped start exceeds its clamped end.
    pub fn resolve(self, total_pages: u32) -> Option<std::ops::RangeInclusive<u32>> {
        let total = i64::from(total_pages);
        match self {
            Self::Single(page) => {
                if (1..=total).contains(&page) {
                    let page = page as u32;
                    Some(page..=page)
                } else {
                    None
                }
            }
            Self::Range(start, end) => {
                if start < 1 || end < 1 || (start > total && end > total) {
                    return None;
                }

                let start = start.max(1);
                let end = end.min(total);
                if start <= end {
                    Some(start as u32..=end as u32)
                } else {
                    None
                }
            }
        }
    }
}

fn parse_int(part: &str) -> Option<i64> {
    match part.parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Pages selected by range text, with the tokens that were thrown away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSet {
    pages: Vec<u32>,
    rejected: Vec<String>,
}

impl PageSet {
    /// Accepted 1-based pages, strictly ascending.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// Raw tokens that were rejected, in input order.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Number of accepted pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page was accepted.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if a 1-based page was accepted.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// Split into accepted pages and rejected tokens.
    pub fn into_parts(self) -> (Vec<u32>, Vec<String>) {
        (self.pages, self.rejected)
    }
}

/// Split text into tokens.
///
/// Tokens are separated by commas and have all whitespace removed. Tokens
/// that are empty afterwards are dropped without being reported.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(',')
        .map(|part| part.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parse page-range text against a document of `total_pages` pages.
///
/// # Examples
///
/// ```
/// use ezpdfkit::range::parse;
///
/// let set = parse("1, 3-5, 8", 10);
/// assert_eq!(set.pages(), &[1, 3, 4, 5, 8]);
/// assert!(set.rejected().is_empty());
/// ```
pub fn parse(text: &str, total_pages: u32) -> PageSet {
    let mut pages = BTreeSet::new();
    let mut rejected = Vec::new();

    for token in tokenize(text) {
        match PageToken::parse(&token).and_then(|t| t.resolve(total_pages)) {
            Some(range) => pages.extend(range),
            None => rejected.push(token),
        }
    }

    PageSet {
        pages: pages.into_iter().collect(),
        rejected,
    }
}

/// Parse split-point text against a document of `total_pages` pages.
///
/// Only single pages `p` with `1 <= p < total_pages` are accepted; ranges
/// and anything else end up in [`PageSet::rejected`].
pub fn parse_split_points(text: &str, total_pages: u32) -> PageSet {
    let mut points = BTreeSet::new();
    let mut rejected = Vec::new();

    for token in tokenize(text) {
        match PageToken::parse(&token) {
            Some(PageToken::Single(p)) if p >= 1 && p < i64::from(total_pages) => {
                points.insert(p as u32);
            }
            _ => rejected.push(token),
        }
    }

    PageSet {
        pages: points.into_iter().collect(),
        rejected,
    }
}
