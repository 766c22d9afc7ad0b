pub mod db;
pub mod output;
pub mod parser;
pub mod pdf;
pub mod settings;

pub use output::{extract_from_pdf, ExtractionResult};
pub use parser::extract::contact::{
    extract_email, extract_github, extract_linkedin, extract_phone, extract_website,
};
pub use parser::extract::education::extract_education;
pub use parser::extract::profile::{extract_job_title, extract_location, extract_name};
pub use parser::extract::skills::extract_skills;
pub use parser::{extract_work_experiences, parse_resume, segment_sections};
pub use pdf::{extract_plain_text, PdfError};
