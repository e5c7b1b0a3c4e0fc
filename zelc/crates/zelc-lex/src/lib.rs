//! zelc-lex - Lexical Analyzer for the Zel Programming Language
//!
//! This crate turns raw source text into a stream of classified tokens and
//! records every anomaly it meets along the way. It is the first phase of
//! the compiler.
//!
//! # Overview
//!
//! Two pieces work together:
//!
//! - The **source arena** ([`SourceManager`]) owns all source text and
//!   hands out stable [`BufferId`] handles. Tokens never own text; they
//!   store offsets and resolve views through the arena.
//! - The **scanning engine** ([`Lexer`] plus five scanners) converts a
//!   cursor position into one [`Token`] at a time, in basic mode
//!   (significant tokens only) or trivia-preserving mode.
//!
//! Malformed input never aborts the scan: each scanner reports a
//! [`LexerError`] and keeps going, so one pass collects every problem in a
//! file. The [`report`] module bridges those records into the shared
//! diagnostics engine.
//!
//! # Example
//!
//! ```
//! use zelc_lex::{Lexer, SourceManager, TokenKind};
//!
//! let mut sm = SourceManager::new();
//! let buffer = sm.add_buffer("let answer = 42;", "main.zl");
//!
//! let mut lexer = Lexer::new(&sm, buffer);
//! let tokens = lexer.tokenize();
//!
//! assert_eq!(tokens[0].kind(), TokenKind::KwLet);
//! assert_eq!(tokens[1].value(&sm), "answer");
//! assert!(!lexer.has_errors());
//! ```
//!
//! # Module Structure
//!
//! - [`source_manager`] - the source arena and buffer handles
//! - [`source_reader`] - cursor movement with line/column tracking
//! - [`token`] - token, trivia, and escape-flag definitions
//! - [`lexer`] - the facade and the five scanners
//! - [`error`] - lexer-local error records and the collector
//! - [`locator`] - the diagnostics-engine source locator adapter
//! - [`report`] - bridging lexer errors into diagnostics
//! - [`utf8`] - byte classification helpers

#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod locator;
pub mod report;
pub mod scanner;
pub mod source_manager;
pub mod source_reader;
pub mod token;
pub mod utf8;

pub use error::{expansion_chain, ErrorCollector, LexerError, LexerErrorCode};
pub use lexer::{CommentScanner, IdentScanner, Lexer, NumberScanner, OperatorScanner, StringScanner};
pub use locator::LexerSourceLocator;
pub use report::{error_to_diagnostic, register_error_codes, report_errors};
pub use scanner::ScanContext;
pub use source_manager::{BufferId, ExpansionId, ExpansionInfo, SourceManager};
pub use source_reader::{SourceReader, MAX_TOKEN_LENGTH};
pub use token::{
    keyword_from_ident, EscapeFlags, SourceLocation, Token, TokenKind, TokenSpan, Trivia,
    TriviaKind,
};
