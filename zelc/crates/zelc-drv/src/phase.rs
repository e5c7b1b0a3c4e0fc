//! Lexer phase - the driver-facing lexing contract.
//!
//! [`LexerPhase`] owns a source arena and runs the lexer over files or
//! in-memory sources. Operational failures (missing file, oversized input,
//! unreadable stream) are typed [`PhaseError`]s returned out-of-band: they
//! make no token stream meaningful at all. In-band lexer errors surface
//! through [`LexOutcome::has_errors`] plus the outcome's error list, and
//! never abort the phase.

use std::path::{Path, PathBuf};

use thiserror::Error;

use zelc_lex::{BufferId, Lexer, LexerError, SourceManager, Token};

/// Externally-enforced input limits.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    /// Maximum input size in bytes
    pub max_file_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 16 * 1024 * 1024,
        }
    }
}

/// Lexer phase options.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexerOptions {
    /// Attach whitespace/newline/comment trivia to tokens
    pub preserve_trivia: bool,
    /// Input limits
    pub limits: Limits,
}

/// A typed operational failure of the lexer phase.
///
/// Distinct from in-band lexer errors: these mean lexing could not run.
#[derive(Debug, Error)]
pub enum PhaseError {
    /// The input file does not exist
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// The input exceeds the maximum file size
    #[error("file too large: {path} ({size} bytes, max {max} bytes)")]
    FileTooLarge {
        /// The offending path (or virtual name)
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured maximum in bytes
        max: u64,
    },

    /// The input could not be read
    #[error("failed to open {path}: {source}")]
    OpenFailed {
        /// The offending path
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// The result of one lexing run.
pub struct LexOutcome {
    /// The buffer the source was loaded into
    pub buffer: BufferId,
    /// All tokens, including the trailing EOF
    pub tokens: Vec<Token>,
    /// The lexer errors collected during the pass
    pub errors: Vec<LexerError>,
    /// True if any lexer error was collected
    pub has_errors: bool,
}

/// Runs the lexer over files or in-memory sources.
///
/// # Examples
///
/// ```
/// use zelc_drv::{LexerOptions, LexerPhase};
///
/// let mut phase = LexerPhase::new(LexerOptions::default());
/// let outcome = phase.run_on_source("let x = 1;", "<stdin>").unwrap();
/// assert!(!outcome.has_errors);
/// assert_eq!(outcome.tokens.len(), 6); // five tokens + EOF
/// ```
pub struct LexerPhase {
    source_manager: SourceManager,
    options: LexerOptions,
}

impl LexerPhase {
    /// Create a phase with the given options
    pub fn new(options: LexerOptions) -> Self {
        Self {
            source_manager: SourceManager::new(),
            options,
        }
    }

    /// Lex a source file.
    ///
    /// Checks existence and the size limit before reading; failures are
    /// typed and out-of-band.
    pub fn run_on_file(&mut self, path: &Path) -> Result<LexOutcome, PhaseError> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => return Err(PhaseError::FileNotFound(path.to_path_buf())),
        };

        let size = metadata.len();
        if size > self.options.limits.max_file_size {
            return Err(PhaseError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max: self.options.limits.max_file_size,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| PhaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let buffer = self
            .source_manager
            .add_buffer(content, path.display().to_string());
        Ok(self.run_lexer(buffer))
    }

    /// Lex an in-memory source under a virtual name
    pub fn run_on_source(
        &mut self,
        source: &str,
        virtual_name: &str,
    ) -> Result<LexOutcome, PhaseError> {
        let size = source.len() as u64;
        if size > self.options.limits.max_file_size {
            return Err(PhaseError::FileTooLarge {
                path: PathBuf::from(virtual_name),
                size,
                max: self.options.limits.max_file_size,
            });
        }

        let buffer = self.source_manager.add_buffer(source, virtual_name);
        Ok(self.run_lexer(buffer))
    }

    fn run_lexer(&self, buffer: BufferId) -> LexOutcome {
        let mut lexer = Lexer::new(&self.source_manager, buffer);

        let tokens = if self.options.preserve_trivia {
            lexer.tokenize_with_trivia()
        } else {
            lexer.tokenize()
        };

        let errors = lexer.errors().to_vec();
        let has_errors = !errors.is_empty();

        LexOutcome {
            buffer,
            tokens,
            errors,
            has_errors,
        }
    }

    /// Get the source arena (for resolving token text)
    pub fn source_manager(&self) -> &SourceManager {
        &self.source_manager
    }
}
