//! Source Arena - owns all source text for a compilation.
//!
//! The [`SourceManager`] is the owning store for every source buffer. Tokens
//! and spans only carry a [`BufferId`] plus offsets; resolving text always
//! goes back through the arena, so a token stays valid for as long as the
//! arena is alive. Buffers are append-only and never removed within a
//! process, which keeps handles stable.
//!
//! All accessors follow a silent-failure contract: an invalid handle or an
//! out-of-range position yields an empty view, never a panic. Callers treat
//! empty results as "nothing to show".
//!
//! # Examples
//!
//! ```
//! use zelc_lex::SourceManager;
//!
//! let mut sm = SourceManager::new();
//! let buffer = sm.add_buffer("let x = 42;", "main.zl");
//!
//! assert_eq!(sm.get_source(buffer), "let x = 42;");
//! assert_eq!(sm.slice(buffer, 4, 1), "x");
//! assert_eq!(sm.filename(buffer), "main.zl");
//! ```

use std::sync::OnceLock;

/// A handle to a source buffer in the [`SourceManager`].
///
/// Value 0 is the invalid sentinel; valid handles start at 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u32);

impl BufferId {
    /// The invalid buffer handle
    pub const INVALID: BufferId = BufferId(0);

    /// Returns true if this handle refers to a buffer
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Get the raw handle value (0 = invalid)
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Reconstruct a handle from its raw value
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        BufferId(value)
    }
}

/// A handle to recorded macro-expansion information.
///
/// Reserved for the future macro system: handles can be allocated and
/// stored on tokens today, but nothing produces them yet. Value 0 is the
/// invalid sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExpansionId(u32);

impl ExpansionId {
    /// The invalid expansion handle
    pub const INVALID: ExpansionId = ExpansionId(0);

    /// Returns true if this handle refers to an expansion record
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Get the raw handle value (0 = invalid)
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Macro-expansion bookkeeping.
///
/// Forward-compatibility seam for the macro system: the fields describe a
/// macro call site and definition site with plain offsets so the record has
/// no dependency on token types. Currently stored but never queried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionInfo {
    /// Buffer containing the macro call
    pub call_site_buffer: BufferId,
    /// Byte offset of the macro call
    pub call_site_offset: u32,
    /// Line of the macro call (1-based)
    pub call_site_line: u32,
    /// Column of the macro call (1-based)
    pub call_site_column: u32,
    /// Buffer containing the macro definition
    pub macro_def_buffer: BufferId,
    /// Offset of the macro name within the definition buffer
    pub macro_name_offset: u32,
    /// Length of the macro name
    pub macro_name_length: u16,
    /// Parent expansion for nested macros (INVALID = outermost)
    pub parent: ExpansionId,
}

/// One owned source buffer.
struct Buffer {
    source: String,
    filename: String,
    /// Byte offsets where each line starts; built on first line query.
    line_offsets: OnceLock<Vec<usize>>,
    is_synthetic: bool,
    parent: Option<BufferId>,
}

impl Buffer {
    fn line_offsets(&self) -> &[usize] {
        self.line_offsets.get_or_init(|| {
            let mut offsets = vec![0];
            for (i, b) in self.source.bytes().enumerate() {
                if b == b'\n' {
                    offsets.push(i + 1);
                }
            }
            offsets
        })
    }
}

/// The owning store of all source text.
///
/// Tokens reference buffers only by [`BufferId`]; the arena hands out string
/// views on demand. Not designed for concurrent mutation: lex multiple files
/// concurrently by giving each `Lexer` its own arena.
#[derive(Default)]
pub struct SourceManager {
    buffers: Vec<Buffer>,
    expansions: Vec<ExpansionInfo>,
}

impl SourceManager {
    /// Create an empty source manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source buffer, returning its handle
    ///
    /// # Examples
    ///
    /// ```
    /// use zelc_lex::SourceManager;
    ///
    /// let mut sm = SourceManager::new();
    /// let id = sm.add_buffer("fn main() {}", "main.zl");
    /// assert!(id.is_valid());
    /// ```
    pub fn add_buffer(&mut self, source: impl Into<String>, filename: impl Into<String>) -> BufferId {
        self.push_buffer(source.into(), filename.into(), false, None)
    }

    /// Add a synthetic buffer derived from another buffer.
    ///
    /// Synthetic buffers hold generated text (e.g. future macro expansions).
    /// The parent link lets error reporting walk back to the real file.
    pub fn add_synthetic_buffer(
        &mut self,
        source: impl Into<String>,
        synthetic_name: impl Into<String>,
        parent: BufferId,
    ) -> BufferId {
        self.push_buffer(source.into(), synthetic_name.into(), true, Some(parent))
    }

    fn push_buffer(
        &mut self,
        source: String,
        filename: String,
        is_synthetic: bool,
        parent: Option<BufferId>,
    ) -> BufferId {
        self.buffers.push(Buffer {
            source,
            filename,
            line_offsets: OnceLock::new(),
            is_synthetic,
            parent,
        });
        // Handle values are 1-based; 0 stays the invalid sentinel.
        BufferId(self.buffers.len() as u32)
    }

    fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        if !id.is_valid() {
            return None;
        }
        self.buffers.get(id.0 as usize - 1)
    }

    /// Get the full source of a buffer ("" for invalid handles)
    pub fn get_source(&self, id: BufferId) -> &str {
        self.buffer(id).map_or("", |b| &b.source)
    }

    /// Get a slice of a buffer's source.
    ///
    /// Out-of-range requests are clamped to the buffer end; invalid handles
    /// yield "".
    pub fn slice(&self, id: BufferId, offset: u32, length: u16) -> &str {
        self.slice_range(id, offset, offset.saturating_add(length as u32))
    }

    /// Get an arbitrary byte range of a buffer's source.
    ///
    /// Like [`slice`](Self::slice), but without the token-length limit;
    /// used by the diagnostics locator for whole-span text.
    pub fn slice_range(&self, id: BufferId, start: u32, end: u32) -> &str {
        let Some(buffer) = self.buffer(id) else {
            return "";
        };
        let len = buffer.source.len();
        let start = start as usize;
        if start >= len {
            return "";
        }
        let end = (end as usize).min(len);
        if end <= start {
            return "";
        }
        buffer.source.get(start..end).unwrap_or("")
    }

    /// Get the filename of a buffer ("" for invalid handles)
    pub fn filename(&self, id: BufferId) -> &str {
        self.buffer(id).map_or("", |b| &b.filename)
    }

    /// Get the content of one line, without the trailing newline.
    ///
    /// `line` is 1-based. The line-offset table is built lazily on the
    /// first query and cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use zelc_lex::SourceManager;
    ///
    /// let mut sm = SourceManager::new();
    /// let id = sm.add_buffer("first\nsecond\nthird", "main.zl");
    /// assert_eq!(sm.line_content(id, 2), "second");
    /// assert_eq!(sm.line_content(id, 9), "");
    /// ```
    pub fn line_content(&self, id: BufferId, line: u32) -> &str {
        let Some(buffer) = self.buffer(id) else {
            return "";
        };
        if line == 0 {
            return "";
        }
        let offsets = buffer.line_offsets();
        let index = line as usize - 1;
        let Some(&start) = offsets.get(index) else {
            return "";
        };

        let mut end = match offsets.get(index + 1) {
            Some(&next_start) => next_start,
            None => buffer.source.len(),
        };
        let bytes = buffer.source.as_bytes();
        if end > start && bytes[end - 1] == b'\n' {
            end -= 1;
        }
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        &buffer.source[start..end]
    }

    /// Convert a byte offset into a (line, column) position.
    ///
    /// Line and column are 1-based; the column counts UTF-8 characters.
    /// Returns `None` for invalid handles.
    pub fn line_and_column(&self, id: BufferId, offset: u32) -> Option<(u32, u32)> {
        let buffer = self.buffer(id)?;
        let offsets = buffer.line_offsets();
        let offset = (offset as usize).min(buffer.source.len());

        let line_index = match offsets.binary_search(&offset) {
            Ok(index) => index,
            Err(insert) => insert - 1,
        };
        let line_start = offsets[line_index];
        let column = buffer.source[line_start..offset].chars().count() as u32 + 1;
        Some((line_index as u32 + 1, column))
    }

    /// Get the number of buffers added so far
    #[inline]
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Check if a buffer holds generated (synthetic) text
    pub fn is_synthetic(&self, id: BufferId) -> bool {
        self.buffer(id).is_some_and(|b| b.is_synthetic)
    }

    /// Get the direct parent of a synthetic buffer
    pub fn parent_buffer(&self, id: BufferId) -> Option<BufferId> {
        self.buffer(id).and_then(|b| b.parent)
    }

    /// Get the filename chain from a buffer to its outermost real file.
    ///
    /// Used for error reporting on generated code, e.g.
    /// `<derived text> -> src/main.zl`. The chain runs innermost to
    /// outermost; a plain file buffer yields a one-element chain.
    pub fn file_chain(&self, id: BufferId) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = id;
        while let Some(buffer) = self.buffer(current) {
            chain.push(buffer.filename.clone());
            match buffer.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        chain
    }

    /// Record macro-expansion information, returning its handle
    pub fn add_expansion_info(&mut self, info: ExpansionInfo) -> ExpansionId {
        self.expansions.push(info);
        ExpansionId(self.expansions.len() as u32)
    }

    /// Look up recorded macro-expansion information
    pub fn expansion_info(&self, id: ExpansionId) -> Option<&ExpansionInfo> {
        if !id.is_valid() {
            return None;
        }
        self.expansions.get(id.0 as usize - 1)
    }
}
