//! Text utilities for wiki page source.
//!
//! The main entry point is [`get_section`], which carves a page into numbered
//! sections separated by horizontal-rule markers (`----` at the start of a
//! line). Editing and transclusion features use it to address part of a page
//! without parsing the markup.
//!
//! A few smaller helpers used when interpreting plugin parameters and page
//! text live here as well:
//!
//! - [`replace_string_case_insensitive`] for case-blind literal substitution
//! - [`is_positive`] for the wiki's lenient boolean parameter values
//!
//! # Examples
//!
//! ```
//! use wikirender::text::{count_sections, get_section};
//!
//! let page = "Intro\n----\nDetails\n----\nFooter";
//! assert_eq!(count_sections(page), 3);
//! assert_eq!(get_section(page, 2).unwrap(), "\nDetails\n");
//! ```

mod sections;


pub use sections::{
    MARKER_MIN_LEN, SectionError, Sections, count_sections, get_section, marker_ranges, sections,
};

use regex::{NoExpand, RegexBuilder};

/// Replace every occurrence of `src` in `orig` with `dest`, ignoring case.
///
/// Matches are found left to right and never overlap. `dest` is inserted
/// literally. An empty `src` leaves the text unchanged.
///
/// # Errors
///
/// Returns an error only if the escaped pattern exceeds the regex size limit.
pub fn replace_string_case_insensitive(
    orig: &str,
    src: &str,
    dest: &str,
) -> Result<String, regex::Error> {
    if src.is_empty() {
        return Ok(orig.to_string());
    }

    let pattern = RegexBuilder::new(&regex::escape(src)).case_insensitive(true).build()?;
    Ok(pattern.replace_all(orig, NoExpand(dest)).into_owned())
}

/// Whether a parameter value reads as "yes".
///
/// Accepts `true`, `on` and `yes` in any case, ignoring surrounding whitespace.
/// Everything else, including unparseable input, is negative.
#[must_use]
pub fn is_positive(value: &str) -> bool {
    let value = value.trim();
    ["true", "on", "yes"].iter().any(|word| value.eq_ignore_ascii_case(word))
}
