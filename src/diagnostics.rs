//! One-way diagnostic channel out of the enclave.
//!
//! The boundary reports human-readable trace output through a
//! [`DiagnosticSink`] injected at construction. Sink results never influence
//! control flow: an error is logged and the operation carries on.

/// Error reported by a sink that could not deliver a trace record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("diagnostic sink failed: {0}")]
pub struct SinkError(pub String);

/// Receiver for trace output.
pub trait DiagnosticSink {
    /// Accepts a line of text.
    fn print_text(&self, text: &str) -> Result<(), SinkError>;

    /// Accepts a raw buffer, typically rendered as hex.
    fn print_bytes(&self, bytes: &[u8]) -> Result<(), SinkError>;
}

/// Forwards trace output to the `log` facade at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn print_text(&self, text: &str) -> Result<(), SinkError> {
        log::debug!("{}", text.trim_end());
        Ok(())
    }

    fn print_bytes(&self, bytes: &[u8]) -> Result<(), SinkError> {
        log::debug!("{}", hex::encode(bytes));
        Ok(())
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn print_text(&self, _text: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn print_bytes(&self, _bytes: &[u8]) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn print_text(&self, text: &str) -> Result<(), SinkError> {
        (**self).print_text(text)
    }

    fn print_bytes(&self, bytes: &[u8]) -> Result<(), SinkError> {
        (**self).print_bytes(bytes)
    }
}
