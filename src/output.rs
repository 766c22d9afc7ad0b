use serde::{Serialize, Serializer};
use tracing::warn;

use crate::parser::{parse_resume, Section, SectionKind, SectionMap, StructuredRecord};
use crate::pdf::{extract_plain_text, Backend, Capabilities, PlainText, Source};

/// JSON envelope for one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub full_text: String,
    pub sections: SectionMap,
    #[serde(serialize_with = "record_or_empty")]
    pub structured_data: Option<StructuredRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn record_or_empty<S: Serializer>(
    record: &Option<StructuredRecord>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match record {
        Some(r) => r.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

impl ExtractionResult {
    /// Whole text as `content`, one `page_N` per page, then identified sections.
    pub fn from_plain_text(plain: PlainText) -> Self {
        let structured = parse_resume(&plain.text);

        let mut sections = SectionMap::new();
        sections.insert(synthetic(SectionKind::Content, &plain.text));
        for (i, page) in plain.pages.iter().flatten().enumerate() {
            sections.insert(synthetic(SectionKind::Page(i + 1), page));
        }
        sections.merge(structured.sections.clone());

        Self {
            full_text: plain.text,
            sections,
            structured_data: Some(structured),
            backend: Some(plain.backend),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            full_text: String::new(),
            sections: SectionMap::new(),
            structured_data: None,
            backend: None,
            error: Some(message.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

fn synthetic(kind: SectionKind, body: &str) -> Section {
    Section {
        kind,
        header: String::new(),
        start: 0,
        end: 0,
        body: body.to_string(),
    }
}

/// Extract and parse one PDF. Failures are reported inside the result.
pub fn extract_from_pdf(source: Source<'_>, caps: &Capabilities) -> ExtractionResult {
    match extract_plain_text(source, caps) {
        Ok(plain) => ExtractionResult::from_plain_text(plain),
        Err(e) => {
            warn!(error = %e, "text extraction failed");
            ExtractionResult::failure(e.to_string())
        }
    }
}
