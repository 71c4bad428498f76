use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{RankError, Result};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())?;
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            ext if SUPPORTED_EXTENSIONS.contains(&ext) => Some(Self::Text),
            _ => None,
        }
    }
}

/// A resume loaded from disk; `name` is the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText {
    pub name: String,
    pub text: String,
}

// Unknown extensions are read as text.
pub fn extract_text(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|source| RankError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let kind = DocumentKind::from_path(path).unwrap_or(DocumentKind::Text);
    extract_bytes(path, kind, &data)
}

pub fn extract_bytes(path: &Path, kind: DocumentKind, data: &[u8]) -> Result<String> {
    let extraction_error = |reason: String| RankError::Extraction {
        path: path.to_path_buf(),
        reason,
    };

    match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(data).map_err(|e| extraction_error(e.to_string()))
        }
        DocumentKind::Docx => extract_docx_text(data).map_err(extraction_error),
        DocumentKind::Text => Ok(match String::from_utf8_lossy(data) {
            std::borrow::Cow::Borrowed(text) => text.to_owned(),
            std::borrow::Cow::Owned(text) => {
                warn!(path = %path.display(), "invalid UTF-8 replaced while reading");
                text
            }
        }),
    }
}

/// Loads every supported document under `folder`, recursively, in file-name
/// order. Any file that cannot be read or extracted fails the whole load.
pub fn load_resumes(folder: &Path) -> Result<Vec<ResumeText>> {
    if !folder.is_dir() {
        return Err(RankError::MissingResumeDir(folder.to_path_buf()));
    }

    let mut resumes = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(folder).to_path_buf();
            RankError::Read {
                path,
                source: e.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if DocumentKind::from_path(path).is_none() {
            debug!(path = %path.display(), "skipping unsupported file");
            continue;
        }

        let text = extract_text(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(path = %path.display(), chars = text.len(), "loaded resume");
        resumes.push(ResumeText { name, text });
    }

    if resumes.is_empty() {
        return Err(RankError::NoResumes(folder.to_path_buf()));
    }
    Ok(resumes)
}

fn extract_docx_text(data: &[u8]) -> std::result::Result<String, String> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).map_err(|e| e.to_string())?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| e.to_string())?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    paragraphs_from_document_xml(&xml)
}

fn paragraphs_from_document_xml(xml: &str) -> std::result::Result<String, String> {
    let mut reader = Reader::from_str(xml);

    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if !current.trim().is_empty() {
                        lines.push(current.trim().to_string());
                    }
                    current.clear();
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    let value = e.xml_content().map_err(|e| e.to_string())?;
                    current.push_str(&value);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text {
                    if let Some(ch) = e.resolve_char_ref().map_err(|e| e.to_string())? {
                        current.push(ch);
                    } else {
                        let entity = String::from_utf8_lossy(&e);
                        if let Some(resolved) = quick_xml::escape::resolve_xml_entity(&entity) {
                            current.push_str(resolved);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.to_string()),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}
