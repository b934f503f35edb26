//! Page range expressions.
//!
//! An expression is either the keyword `all` or a comma separated list of
//! page numbers and inclusive `start-end` spans, e.g. `1-5, 8, 11-13`.
//!
//! Two entry points share the grammar but not the error policy:
//! [`resolve`] rejects the whole expression on the first bad token and is
//! used when an order is submitted, while [`count`] never fails and simply
//! skips tokens it cannot use, for the live price preview.

use crate::constants::ALL_PAGES_KEYWORD;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("'{token}' is not a page number or range")]
    Malformed { token: String },
    #[error("range {start}-{end} runs backwards")]
    Reversed { start: u32, end: u32 },
    #[error("page {page} is outside the document (1-{total_pages})")]
    OutOfBounds { page: u32, total_pages: u32 },
}

/// One token of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSpan {
    Single(u32),
    /// Inclusive span, `start <= end`
    Range { start: u32, end: u32 },
}

impl PageSpan {
    pub fn first(self) -> u32 {
        match self {
            PageSpan::Single(page) => page,
            PageSpan::Range { start, .. } => start,
        }
    }

    pub fn last(self) -> u32 {
        match self {
            PageSpan::Single(page) => page,
            PageSpan::Range { end, .. } => end,
        }
    }

    pub fn len(self) -> u32 {
        self.last() - self.first() + 1
    }
}

impl fmt::Display for PageSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSpan::Single(page) => write!(f, "{}", page),
            PageSpan::Range { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

/// A resolved expression.
///
/// Spans are kept in input order and are not merged: `1,2,2,3` has a
/// length of 4. Pricing relies on this additive count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSet {
    All { total_pages: u32 },
    Spans(Vec<PageSpan>),
}

impl PageSet {
    /// Number of pages, summed per span
    pub fn len(&self) -> u32 {
        match self {
            PageSet::All { total_pages } => *total_pages,
            PageSet::Spans(spans) => spans
                .iter()
                .map(|span| span.len())
                .fold(0, u32::saturating_add),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSet::All { .. } => f.write_str(ALL_PAGES_KEYWORD),
            PageSet::Spans(spans) => {
                for (i, span) in spans.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", span)?;
                }
                Ok(())
            }
        }
    }
}

/// Resolve `expr` against a document of `total_pages` pages, rejecting the
/// whole expression if any token is malformed or out of bounds.
pub fn resolve(expr: &str, total_pages: u32) -> Result<PageSet, RangeError> {
    if is_all(expr) {
        return Ok(PageSet::All { total_pages });
    }

    let mut spans = Vec::new();
    for token in tokens(expr) {
        spans.push(parse_token(token, total_pages)?);
    }
    Ok(PageSet::Spans(spans))
}

/// Check `expr` without keeping the resolved pages
pub fn validate(expr: &str, total_pages: u32) -> Result<(), RangeError> {
    resolve(expr, total_pages).map(|_| ())
}

/// Count the pages selected by `expr`. Tokens that fail to parse or fall
/// outside `1..=total_pages` contribute nothing. The count saturates at
/// `u32::MAX`.
pub fn count(expr: &str, total_pages: u32) -> u32 {
    if is_all(expr) {
        return total_pages;
    }

    tokens(expr)
        .filter_map(|token| parse_token(token, total_pages).ok())
        .map(PageSpan::len)
        .fold(0, u32::saturating_add)
}

/// Expression covering a whole document, as set after an upload
pub fn full_range(total_pages: u32) -> String {
    format!("1-{}", total_pages)
}

fn is_all(expr: &str) -> bool {
    expr.trim() == ALL_PAGES_KEYWORD
}

// Empty tokens (`1,,3` or a trailing comma) are skipped.
fn tokens(expr: &str) -> impl Iterator<Item = &str> {
    expr.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_token(token: &str, total_pages: u32) -> Result<PageSpan, RangeError> {
    let (start, end, span) = match token.split_once('-') {
        Some((start, end)) => {
            let start = parse_page(start, token)?;
            let end = parse_page(end, token)?;
            (start, end, PageSpan::Range { start, end })
        }
        None => {
            let page = parse_page(token, token)?;
            (page, page, PageSpan::Single(page))
        }
    };

    if start > end {
        return Err(RangeError::Reversed { start, end });
    }
    for page in [start, end] {
        if page < 1 || page > total_pages {
            return Err(RangeError::OutOfBounds { page, total_pages });
        }
    }
    Ok(span)
}

fn parse_page(part: &str, token: &str) -> Result<u32, RangeError> {
    part.trim().parse().map_err(|_| RangeError::Malformed {
        token: token.to_string(),
    })
}
