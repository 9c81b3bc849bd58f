use crate::error::SommaireError;
use crate::extraction::{PageContent, PdfExtractor, PositionedWord};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF layout backend using pdftotext (from poppler-utils).
///
/// Page text comes from plain `pdftotext`, word boxes from `pdftotext -bbox`.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, SommaireError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| SommaireError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| SommaireError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext(&tmp_path, None)?;
        let xhtml = run_pdftotext(&tmp_path, Some("-bbox"))?;
        let word_pages = parse_bbox_words(&xhtml)?;

        // pdftotext ends every page with a form feed, including the last one.
        let mut texts: Vec<&str> = text.split('\x0c').collect();
        if texts.len() > word_pages.len() && texts.last().is_some_and(|t| t.trim().is_empty()) {
            texts.pop();
        }

        let page_count = texts.len().max(word_pages.len());
        let mut word_pages = word_pages.into_iter();
        let pages = (0..page_count)
            .map(|i| PageContent {
                page_number: i + 1,
                text: texts.get(i).map(|t| t.to_string()).unwrap_or_default(),
                words: word_pages.next().unwrap_or_default(),
            })
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(pdf_path: &Path, mode: Option<&str>) -> Result<String, SommaireError> {
    let mut cmd = Command::new("pdftotext");
    if let Some(flag) = mode {
        cmd.arg(flag);
    }
    let output = cmd
        .arg("-enc")
        .arg("UTF-8")
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SommaireError::PdftotextNotFound
            } else {
                SommaireError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(SommaireError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `pdftotext -bbox` XHTML into one word list per `<page>`.
fn parse_bbox_words(xhtml: &str) -> Result<Vec<Vec<PositionedWord>>, SommaireError> {
    let mut reader = Reader::from_str(xhtml);
    let mut buf = Vec::new();

    let mut pages: Vec<Vec<PositionedWord>> = Vec::new();
    let mut current: Option<(f64, f64, String)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"page" => pages.push(Vec::new()),
                b"word" => {
                    let mut x_min = None;
                    let mut y_min = None;
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value);
                        match attr.key.as_ref() {
                            b"xMin" => x_min = value.parse::<f64>().ok(),
                            b"yMin" => y_min = value.parse::<f64>().ok(),
                            _ => {}
                        }
                    }
                    current = x_min.zip(y_min).map(|(x, y)| (x, y, String::new()));
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"word" {
                    if let Some((x, y, text)) = current.take() {
                        let text = text.trim();
                        match pages.last_mut() {
                            Some(page) if !text.is_empty() => {
                                page.push(PositionedWord::new(text, x, y));
                            }
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SommaireError::Extraction(format!(
                    "invalid pdftotext -bbox output at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(pages)
}
