//! Section splitting for wiki page text.
//!
//! A page is divided into numbered sections by horizontal-rule markers: a run
//! of four or more hyphens at the very start of a line. Sections are numbered
//! from 1 in document order, so a page with `k` markers always has `k + 1`
//! sections, any of which may be empty.
//!
//! The marker consumes only its hyphen run. Whatever follows on the same line,
//! including the line terminator, belongs to the next section:
//!
//! ```text
//! First section\n----\nSecond section
//! ^^^^^^^^^^^^^^^    ^^^^^^^^^^^^^^^^
//!    section 1          section 2 (starts with "\n")
//! ```
//!
//! Re-inserting the removed markers between consecutive sections therefore
//! reproduces the original text byte for byte.

use std::ops::Range;
use thiserror::Error;

/// Minimum number of leading hyphens that turn a line into a section marker.
pub const MARKER_MIN_LEN: usize = 4;

/// Errors produced when addressing a section by number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// The requested section number is not positive or past the last section.
    #[error("Invalid section index {index}: {reason}")]
    InvalidSectionIndex {
        /// The section number that was requested
        index: i64,
        /// Why the number was rejected
        reason: String,
    },
}

/// Lazy iterator over the sections of a text, yielding borrowed slices.
///
/// Created by [`sections`]. Each call to `next` scans forward only as far as
/// the next marker, so taking the `n`th section never looks past it.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    text: &'a str,
    cursor: usize,
    finished: bool,
}

impl<'a> Iterator for Sections<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.finished {
            return None;
        }

        match next_marker(self.text, self.cursor) {
            Some(marker) => {
                let section = &self.text[self.cursor..marker.start];
                self.cursor = marker.end;
                Some(section)
            }
            None => {
                self.finished = true;
                Some(&self.text[self.cursor..])
            }
        }
    }
}

impl std::iter::FusedIterator for Sections<'_> {}

/// Iterate over the sections of `text` in document order.
///
/// Always yields at least one item; text without markers is a single section.
#[must_use]
pub fn sections(text: &str) -> Sections<'_> {
    Sections {
        text,
        cursor: 0,
        finished: false,
    }
}

/// Iterate over the byte ranges of the marker runs in `text`.
///
/// The `i`th range separates section `i + 1` from section `i + 2`.
pub fn marker_ranges(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut cursor = 0;
    std::iter::from_fn(move || {
        let marker = next_marker(text, cursor)?;
        cursor = marker.end;
        Some(marker)
    })
}

/// Number of sections in `text`: the number of markers plus one.
#[must_use]
pub fn count_sections(text: &str) -> usize {
    marker_ranges(text).count() + 1
}

/// Return section number `section` (1-based) of `text`.
///
/// The returned slice keeps every original line terminator and all leading
/// and trailing whitespace of the section.
///
/// # Errors
///
/// Returns [`SectionError::InvalidSectionIndex`] when `section` is less than 1
/// or greater than the number of sections in the text. Out-of-range numbers
/// are never clamped.
///
/// # Examples
///
/// ```
/// use wikirender::text::get_section;
///
/// let page = "Intro\n----\nBody";
/// assert_eq!(get_section(page, 1).unwrap(), "Intro\n");
/// assert_eq!(get_section(page, 2).unwrap(), "\nBody");
/// assert!(get_section(page, 3).is_err());
/// ```
pub fn get_section(text: &str, section: i64) -> Result<&str, SectionError> {
    if section < 1 {
        return Err(SectionError::InvalidSectionIndex {
            index: section,
            reason: "section numbers start at 1".to_string(),
        });
    }

    let missing = || SectionError::InvalidSectionIndex {
        index: section,
        reason: format!("there is no section no. {section} on the page"),
    };

    let position = usize::try_from(section - 1).map_err(|_| missing())?;
    sections(text).nth(position).ok_or_else(missing)
}

/// Find the first marker run at or after `from`.
///
/// `from` is either a line start or the end of a previous marker run; in the
/// latter case the byte at `from` is not a hyphen, so no marker can start there.
fn next_marker(text: &str, from: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    let mut line_start = from;

    loop {
        let rest = &bytes[line_start..];
        let run = rest.iter().take_while(|&&b| b == b'-').count();
        if run >= MARKER_MIN_LEN {
            return Some(line_start..line_start + run);
        }

        let newline = rest.iter().position(|&b| b == b'\n')?;
        line_start += newline + 1;
    }
}
