//! Source locator adapter for the diagnostics engine.
//!
//! The diagnostics engine resolves spans through the [`SourceLocator`]
//! trait; this adapter implements it over a [`SourceManager`], so rendered
//! diagnostics can show filenames, line/column positions, and source
//! snippets without the engine depending on the lexer's storage format.

use zelc_diag::{LineColumn, SourceLocator, Span};

use crate::source_manager::{BufferId, SourceManager};

/// [`SourceLocator`] implementation over the lexer's source arena.
///
/// Span file ids are the raw [`BufferId`] values, so any span produced from
/// a token or lexer error resolves directly.
///
/// # Examples
///
/// ```
/// use zelc_diag::{SourceLocator, Span};
/// use zelc_lex::{LexerSourceLocator, SourceManager};
///
/// let mut sm = SourceManager::new();
/// let buffer = sm.add_buffer("let x = 1;", "main.zl");
/// let locator = LexerSourceLocator::new(&sm);
///
/// let span = Span::new(buffer.as_u32(), 4, 5);
/// assert_eq!(locator.filename(span), "main.zl");
/// assert_eq!(locator.source_slice(span), "x");
/// ```
pub struct LexerSourceLocator<'sm> {
    sm: &'sm SourceManager,
}

impl<'sm> LexerSourceLocator<'sm> {
    /// Create a locator over a source arena
    pub fn new(sm: &'sm SourceManager) -> Self {
        Self { sm }
    }
}

impl SourceLocator for LexerSourceLocator<'_> {
    fn filename(&self, span: Span) -> &str {
        self.sm.filename(BufferId::from_u32(span.file_id))
    }

    fn line_column(&self, file_id: u32, offset: u32) -> LineColumn {
        match self.sm.line_and_column(BufferId::from_u32(file_id), offset) {
            Some((line, column)) => LineColumn { line, column },
            None => LineColumn::default(),
        }
    }

    fn line_content(&self, file_id: u32, line: u32) -> &str {
        self.sm.line_content(BufferId::from_u32(file_id), line)
    }

    fn source_slice(&self, span: Span) -> &str {
        self.sm
            .slice_range(BufferId::from_u32(span.file_id), span.start, span.end)
    }
}
