//! Machine-oriented diagnostic rendering.
//!
//! [`JsonEmitter`] serializes diagnostics to a JSON document:
//!
//! ```json
//! {"diagnostics": [{"level": "...", "code": "...", "message": "...",
//!   "spans": [...], "children": [...], "suggestions": [...]}, ...],
//!  "stats": {"error_count": 0, "warning_count": 0, "note_count": 0,
//!   "unique_error_codes": []}}
//! ```
//!
//! Diagnostics are buffered as they arrive; the document is written once,
//! on `emit_summary` (or on `flush` if no summary was requested), so the
//! output is well-formed JSON either way.

use std::io::Write;

use serde::Serialize;

use super::markdown::strip_markdown;
use super::Emitter;
use crate::{Diagnostic, DiagnosticStats, SourceLocator, Span};

#[derive(Serialize)]
struct SpanRecord {
    file_id: u32,
    start: u32,
    end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
}

#[derive(Serialize)]
struct ChildRecord {
    level: &'static str,
    message: String,
}

#[derive(Serialize)]
struct SuggestionRecord {
    message: String,
    replacement: String,
}

#[derive(Serialize)]
struct DiagnosticRecord {
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    message: String,
    spans: Vec<SpanRecord>,
    children: Vec<ChildRecord>,
    suggestions: Vec<SuggestionRecord>,
}

#[derive(Serialize)]
struct StatsRecord {
    error_count: usize,
    warning_count: usize,
    note_count: usize,
    unique_error_codes: Vec<String>,
}

#[derive(Serialize)]
struct Document {
    diagnostics: Vec<DiagnosticRecord>,
    stats: StatsRecord,
}

fn span_record(span: Span, locator: Option<&dyn SourceLocator>) -> SpanRecord {
    let mut record = SpanRecord {
        file_id: span.file_id,
        start: span.start,
        end: span.end,
        file: None,
        line: None,
        column: None,
    };
    if let Some(locator) = locator {
        if span.is_valid() {
            record.file = Some(locator.filename(span).to_string());
            let lc = locator.line_column(span.file_id, span.start);
            record.line = Some(lc.line);
            record.column = Some(lc.column);
        }
    }
    record
}

fn diagnostic_record(diag: &Diagnostic, locator: Option<&dyn SourceLocator>) -> DiagnosticRecord {
    DiagnosticRecord {
        level: diag.level.as_str(),
        code: diag.code.map(|c| c.to_string()),
        message: strip_markdown(&diag.message),
        spans: diag
            .spans
            .spans()
            .iter()
            .map(|s| span_record(s.span, locator))
            .collect(),
        children: diag
            .children
            .iter()
            .map(|c| ChildRecord {
                level: c.level.as_str(),
                message: strip_markdown(&c.message),
            })
            .collect(),
        suggestions: diag
            .suggestions
            .iter()
            .map(|s| SuggestionRecord {
                message: strip_markdown(&s.message),
                replacement: s.replacement.clone(),
            })
            .collect(),
    }
}

/// Serializes diagnostics to a JSON document
///
/// # Examples
///
/// ```
/// use zelc_diag::{emitter::{Emitter, JsonEmitter}, Diagnostic, DiagnosticStats};
///
/// let mut emitter = JsonEmitter::new(Vec::new());
/// emitter.emit(&Diagnostic::error("boom"), None);
/// emitter.emit_summary(&DiagnosticStats::default());
/// let doc: serde_json::Value =
///     serde_json::from_slice(&emitter.into_inner()).unwrap();
/// assert_eq!(doc["diagnostics"][0]["message"], "boom");
/// ```
pub struct JsonEmitter<W: Write> {
    out: W,
    pretty: bool,
    buffered: Vec<DiagnosticRecord>,
    written: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a JSON emitter writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            pretty: false,
            buffered: Vec::new(),
            written: false,
        }
    }

    /// Enable pretty-printed output
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Consume the emitter and return the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_document(&mut self, stats: &DiagnosticStats) {
        let document = Document {
            diagnostics: std::mem::take(&mut self.buffered),
            stats: StatsRecord {
                error_count: stats.error_count,
                warning_count: stats.warning_count,
                note_count: stats.note_count,
                unique_error_codes: stats
                    .unique_error_codes
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            },
        };

        let serialized = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        if let Ok(json) = serialized {
            let _ = self.out.write_all(json.as_bytes());
            let _ = self.out.write_all(b"\n");
            self.written = true;
        }
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    fn emit(&mut self, diag: &Diagnostic, locator: Option<&dyn SourceLocator>) {
        self.buffered.push(diagnostic_record(diag, locator));
    }

    fn emit_summary(&mut self, stats: &DiagnosticStats) {
        self.write_document(stats);
    }

    fn flush(&mut self) {
        if !self.written && !self.buffered.is_empty() {
            let stats = DiagnosticStats::default();
            self.write_document(&stats);
        }
        let _ = self.out.flush();
    }
}
