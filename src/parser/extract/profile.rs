use crate::parser::patterns::{JOB_TITLES, LOCATIONS};

use super::first_match;

const NAME_MAX_LINES: usize = 3;
const NAME_MAX_TOKENS: usize = 4;
const NAME_MIN_CHARS: usize = 4;

/// A short line near the top of the document.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .take(NAME_MAX_LINES)
        .map(str::trim)
        .find(|line| {
            line.split_whitespace().count() <= NAME_MAX_TOKENS
                && line.chars().count() >= NAME_MIN_CHARS
        })
        .map(str::to_string)
}

pub fn extract_location(text: &str) -> Option<String> {
    first_match(&LOCATIONS, text)
}

/// Headline job title, not tied to any work-history entry.
pub fn extract_job_title(text: &str) -> Option<String> {
    first_match(&JOB_TITLES, text)
}
