use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::patterns::SECTION_HEADER_RES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Languages,
    Projects,
    Interests,
    References,
    Publications,
    Awards,
    Volunteering,
    /// The whole extracted text.
    Content,
    /// One page of the extracted text, 1-based.
    Page(usize),
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
            SectionKind::Projects => "projects",
            SectionKind::Interests => "interests",
            SectionKind::References => "references",
            SectionKind::Publications => "publications",
            SectionKind::Awards => "awards",
            SectionKind::Volunteering => "volunteering",
            SectionKind::Content => "content",
            SectionKind::Page(_) => "page",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Page(n) => write!(f, "page_{}", n),
            other => f.write_str(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    /// Header text as it appeared in the document.
    pub header: String,
    /// Byte offsets of the untrimmed body in the source text.
    pub start: usize,
    pub end: usize,
    pub body: String,
}

/// Sections keyed by kind, kept in start-offset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section, replacing any earlier one of the same kind.
    pub fn insert(&mut self, section: Section) {
        self.sections.retain(|s| s.kind != section.kind);
        let at = self.sections.partition_point(|s| s.start <= section.start);
        self.sections.insert(at, section);
    }

    /// Insert every section of `other`, later writes winning.
    pub fn merge(&mut self, other: SectionMap) {
        for section in other.sections {
            self.insert(section);
        }
    }

    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.section(kind).map(|s| s.body.as_str())
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for s in &self.sections {
            map.serialize_entry(&s.kind.to_string(), &s.body)?;
        }
        map.end()
    }
}

/// Slice `text` into section bodies at every recognised header.
///
/// Each header match is a boundary at the offset where its content starts.
/// Boundaries are sorted by offset (ties by kind order) and each body runs to
/// the next boundary, or to end-of-text for the last one. A kind seen more
/// than once keeps its last body. No headers yields an empty map.
pub fn segment_sections(text: &str) -> SectionMap {
    let mut boundaries: Vec<(usize, SectionKind, String)> = Vec::new();
    for (kind, re) in SECTION_HEADER_RES.iter() {
        for caps in re.captures_iter(text) {
            let offset = caps.get(0).map_or(0, |m| m.end());
            boundaries.push((offset, *kind, caps[1].trim().to_string()));
        }
    }
    boundaries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    let mut map = SectionMap::new();
    for (i, (start, kind, header)) in boundaries.iter().enumerate() {
        let end = boundaries.get(i + 1).map_or(text.len(), |next| next.0);
        map.insert(Section {
            kind: *kind,
            header: header.clone(),
            start: *start,
            end,
            body: text[*start..end].trim().to_string(),
        });
    }

    debug!(boundaries = boundaries.len(), sections = map.len(), "segmented sections");
    map
}

// ── Tests ──
