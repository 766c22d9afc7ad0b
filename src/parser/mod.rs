pub mod extract;
pub mod patterns;
pub mod sections;

pub use extract::experience::{extract_work_experiences, CapitalizedLinePolicy, EntryPolicy};
pub use extract::{EducationEntry, JobEntry, StructuredRecord};
pub use sections::{segment_sections, Section, SectionKind, SectionMap};

/// Two-pass pipeline: text → sections → structured record.
pub fn parse_resume(text: &str) -> StructuredRecord {
    let sections = sections::segment_sections(text);
    extract::extract_all(text, sections)
}
