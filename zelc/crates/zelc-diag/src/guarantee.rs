//! Type-level proof that an error was emitted.
//!
//! [`ErrorGuaranteed`] can only be obtained from
//! [`DiagContext::emit_error`](crate::DiagContext::emit_error). Code that
//! needs to fail *after* reporting an error should use it as the error type,
//! proving at the type level that the failure was reported:
//!
//! ```text
//! fn lower(expr: &Expr, dcx: &DiagContext) -> Result<Lowered, ErrorGuaranteed> { ... }
//! ```

/// Proof that at least one error-level diagnostic was emitted.
///
/// Not default-constructible: the only way to obtain a value is through
/// [`DiagContext::emit_error`](crate::DiagContext::emit_error). Copyable, so
/// the proof can be passed along freely once obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use = "an ErrorGuaranteed should be returned or converted, not dropped"]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Create the proof token.
    ///
    /// Crate-private: only `DiagContext` mints these.
    pub(crate) fn new_unchecked() -> Self {
        ErrorGuaranteed(())
    }
}

impl std::fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("error(s) already emitted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guaranteed_is_copy() {
        let g1 = ErrorGuaranteed::new_unchecked();
        let g2 = g1;
        let _ = g1; // still usable after copy
        let _ = g2;
    }

    #[test]
    fn test_guaranteed_display() {
        let g = ErrorGuaranteed::new_unchecked();
        assert_eq!(g.to_string(), "error(s) already emitted");
    }
}
