//! Error codes for categorizing compiler diagnostics.
//!
//! This module provides the [`ErrorCode`] type and the process-global
//! [`ErrorRegistry`]. Codes render as `{category letter}{4-digit number}`
//! (e.g. `L1012`), enabling users to look up documentation with
//! `zelc --explain L1012`.
//!
//! # Examples
//!
//! ```
//! use zelc_diag::{ErrorCategory, ErrorCode};
//!
//! let code = ErrorCode::new(ErrorCategory::Lexer, 1012);
//! assert_eq!(code.to_string(), "L1012");
//! ```

use std::fmt;

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::OnceLock;

/// Error category - determines the code prefix letter
///
/// # Examples
///
/// ```
/// use zelc_diag::ErrorCategory;
///
/// assert_eq!(ErrorCategory::Lexer.prefix(), 'L');
/// assert_eq!(ErrorCategory::Parser.prefix(), 'P');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Lexer errors (L1xxx)
    Lexer,
    /// Parser errors (P2xxx)
    Parser,
    /// Semantic analysis errors (S3xxx)
    Semantic,
    /// Code generation errors (C4xxx)
    Codegen,
    /// Driver errors (D5xxx)
    Driver,
}

impl ErrorCategory {
    /// Get the prefix letter for this category
    #[inline]
    pub const fn prefix(self) -> char {
        match self {
            ErrorCategory::Lexer => 'L',
            ErrorCategory::Parser => 'P',
            ErrorCategory::Semantic => 'S',
            ErrorCategory::Codegen => 'C',
            ErrorCategory::Driver => 'D',
        }
    }
}

/// A unique code identifying a diagnostic message
///
/// Codes are immutable values in the format `{prefix}{number:04}`.
/// A code with number 0 is invalid.
///
/// # Examples
///
/// ```
/// use zelc_diag::{ErrorCategory, ErrorCode};
///
/// let code = ErrorCode::new(ErrorCategory::Lexer, 1021);
/// assert_eq!(code.to_string(), "L1021");
/// assert!(code.is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorCode {
    /// The code category
    pub category: ErrorCategory,
    /// The numeric identifier (non-zero for valid codes)
    pub code: u16,
}

impl ErrorCode {
    /// Create a new error code
    ///
    /// # Examples
    ///
    /// ```
    /// use zelc_diag::{ErrorCategory, ErrorCode};
    ///
    /// let code = ErrorCode::new(ErrorCategory::Driver, 5001);
    /// assert_eq!(code.to_string(), "D5001");
    /// ```
    #[inline]
    pub const fn new(category: ErrorCategory, code: u16) -> Self {
        Self { category, code }
    }

    /// Returns true if this code carries a non-zero number
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.code != 0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.category.prefix(), self.code)
    }
}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorCode({self})")
    }
}

/// A registered error code entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEntry {
    /// The error code
    pub code: ErrorCode,
    /// Short description (English, not translated)
    pub brief: &'static str,
    /// Localization key for the long explanation
    pub explanation_key: &'static str,
}

/// Process-global error code registry
///
/// Phases register their codes once at startup; registration is idempotent,
/// so calling a phase's registration function twice is harmless.
///
/// # Examples
///
/// ```
/// use zelc_diag::{ErrorCategory, ErrorCode, ErrorRegistry};
///
/// let code = ErrorCode::new(ErrorCategory::Parser, 2001);
/// ErrorRegistry::global().register(code, "unexpected token", "parser.unexpected_token");
/// assert!(ErrorRegistry::global().is_registered(code));
/// ```
pub struct ErrorRegistry {
    entries: RwLock<IndexMap<ErrorCode, ErrorEntry>>,
}

impl ErrorRegistry {
    /// Get the global registry instance
    pub fn global() -> &'static ErrorRegistry {
        static REGISTRY: OnceLock<ErrorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| ErrorRegistry {
            entries: RwLock::new(IndexMap::new()),
        })
    }

    /// Register an error code
    ///
    /// Re-registering an already registered code keeps the first entry.
    pub fn register(
        &self,
        code: ErrorCode,
        brief: &'static str,
        explanation_key: &'static str,
    ) {
        let mut entries = self.entries.write();
        entries.entry(code).or_insert(ErrorEntry {
            code,
            brief,
            explanation_key,
        });
    }

    /// Look up an error code
    pub fn lookup(&self, code: ErrorCode) -> Option<ErrorEntry> {
        self.entries.read().get(&code).cloned()
    }

    /// Check whether a code has been registered
    pub fn is_registered(&self, code: ErrorCode) -> bool {
        self.entries.read().contains_key(&code)
    }

    /// Get all registered codes in registration order
    pub fn all_codes(&self) -> Vec<ErrorCode> {
        self.entries.read().keys().copied().collect()
    }
}
