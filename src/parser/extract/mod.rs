pub mod contact;
pub mod education;
pub mod experience;
pub mod profile;
pub mod skills;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::sections::{SectionKind, SectionMap};

pub use education::EducationEntry;
pub use experience::JobEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredRecord {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub work_experiences: Vec<JobEntry>,
    pub sections: SectionMap,
}

pub fn extract_all(text: &str, sections: SectionMap) -> StructuredRecord {
    let work_experiences = experience::extract_work_experiences_with(
        text,
        &sections,
        &experience::CapitalizedLinePolicy,
    );
    let skills = skills::extract_skills(body_or_text(&sections, SectionKind::Skills, text));
    let education =
        education::extract_education(body_or_text(&sections, SectionKind::Education, text));

    let record = StructuredRecord {
        email: contact::extract_email(text),
        phone: contact::extract_phone(text),
        linkedin: contact::extract_linkedin(text),
        github: contact::extract_github(text),
        website: contact::extract_website(text),
        name: profile::extract_name(text),
        location: profile::extract_location(text),
        job_title: profile::extract_job_title(text),
        skills,
        education,
        work_experiences,
        sections,
    };

    debug!(
        sections = record.sections.len(),
        jobs = record.work_experiences.len(),
        education = record.education.len(),
        skills = record.skills.len(),
        "extracted structured record"
    );
    record
}

/// Section body when present and non-blank, else the whole text.
fn body_or_text<'a>(sections: &'a SectionMap, kind: SectionKind, text: &'a str) -> &'a str {
    sections
        .get(kind)
        .filter(|body| !body.trim().is_empty())
        .unwrap_or(text)
}

/// Leftmost match of the first pattern that matches anywhere, trimmed.
pub(crate) fn first_match(patterns: &[&LazyLock<Regex>], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

// ── Tests ──
