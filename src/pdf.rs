//! PDF text collaborator: run every enabled backend, keep the longest text.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF file does not exist at path: {0}")]
    NotFound(PathBuf),

    #[error("Cannot read PDF file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No PDF extraction backend is enabled")]
    NoBackends,

    #[error("All extraction methods failed: {}", .0.join("; "))]
    AllBackendsFailed(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Page-wise extraction through lopdf.
    Lopdf,
    /// Whole-document extraction through pdf-extract.
    PdfExtract,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Lopdf => "lopdf",
            Backend::PdfExtract => "pdf_extract",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which backends may run, and how much text counts as a usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub lopdf: bool,
    pub pdf_extract: bool,
    pub min_chars: usize,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            lopdf: true,
            pdf_extract: true,
            min_chars: 1,
        }
    }
}

impl Capabilities {
    fn backends(&self) -> Vec<Box<dyn TextBackend>> {
        let mut backends: Vec<Box<dyn TextBackend>> = Vec::new();
        if self.lopdf {
            backends.push(Box::new(LopdfBackend));
        }
        if self.pdf_extract {
            backends.push(Box::new(PdfExtractBackend));
        }
        backends
    }
}

pub enum Source<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainText {
    pub text: String,
    /// Non-empty page texts, reported only by page-wise backends.
    pub pages: Option<Vec<String>>,
    pub backend: Backend,
}

impl PlainText {
    pub fn char_count(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Raw output of one backend before selection.
pub struct Extraction {
    pub text: String,
    pub pages: Option<Vec<String>>,
}

pub trait TextBackend {
    fn kind(&self) -> Backend;
    fn extract(&self, bytes: &[u8]) -> Result<Extraction, String>;
}

pub struct LopdfBackend;

impl TextBackend for LopdfBackend {
    fn kind(&self) -> Backend {
        Backend::Lopdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction, String> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| e.to_string())?;
        let mut pages = Vec::new();
        for (page_num, _page_id) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(text) if !text.trim().is_empty() => pages.push(text),
                Ok(_) => debug!(page = page_num, "page has no text"),
                Err(e) => warn!(page = page_num, error = %e, "page extraction failed"),
            }
        }
        Ok(Extraction {
            text: pages.join("\n\n"),
            pages: Some(pages),
        })
    }
}

pub struct PdfExtractBackend;

impl TextBackend for PdfExtractBackend {
    fn kind(&self) -> Backend {
        Backend::PdfExtract
    }

    fn extract(&self, bytes: &[u8]) -> Result<Extraction, String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map(|text| Extraction { text, pages: None })
            .map_err(|e| e.to_string())
    }
}

/// Decode `--data` input; anything that is not base64 is taken as raw bytes.
pub fn decode_data(data: &str) -> Vec<u8> {
    match base64::engine::general_purpose::STANDARD.decode(data.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "data is not valid base64, using it as raw bytes");
            data.as_bytes().to_vec()
        }
    }
}

pub fn extract_plain_text(source: Source<'_>, caps: &Capabilities) -> Result<PlainText, PdfError> {
    let owned;
    let bytes = match source {
        Source::Path(path) => {
            if !path.exists() {
                return Err(PdfError::NotFound(path.to_path_buf()));
            }
            owned = std::fs::read(path).map_err(|source| PdfError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
            owned.as_slice()
        }
        Source::Bytes(bytes) => bytes,
    };

    let backends = caps.backends();
    let refs: Vec<&dyn TextBackend> = backends.iter().map(|b| b.as_ref()).collect();
    extract_with_backends(bytes, &refs, caps.min_chars)
}

/// Run `backends` in order and keep the longest usable result; ties go to the
/// earlier backend.
pub fn extract_with_backends(
    bytes: &[u8],
    backends: &[&dyn TextBackend],
    min_chars: usize,
) -> Result<PlainText, PdfError> {
    if backends.is_empty() {
        return Err(PdfError::NoBackends);
    }

    let mut failures = Vec::new();
    let mut best: Option<PlainText> = None;
    for backend in backends {
        let kind = backend.kind();
        let candidate = match backend.extract(bytes) {
            Ok(ex) => PlainText {
                text: ex.text,
                pages: ex.pages,
                backend: kind,
            },
            Err(e) => {
                warn!(backend = %kind, error = %e, "extraction failed");
                failures.push(format!("{kind}: {e}"));
                continue;
            }
        };

        let chars = candidate.char_count();
        debug!(backend = %kind, chars, "extracted text");
        if chars < min_chars.max(1) {
            failures.push(format!("{kind}: {chars} chars, below minimum {min_chars}"));
            continue;
        }
        if best.as_ref().map_or(true, |b| chars > b.char_count()) {
            best = Some(candidate);
        }
    }

    match best {
        Some(plain) => {
            info!(backend = %plain.backend, chars = plain.char_count(), "selected extraction");
            Ok(plain)
        }
        None => Err(PdfError::AllBackendsFailed(failures)),
    }
}
