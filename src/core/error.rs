//! Error types for the logging engine
//!
//! Log calls themselves never surface errors; these types exist for the
//! explicitly fallible operations (tap installation, sink internals) and for
//! the diagnostics the engine prints when a sink degrades.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File sink acquisition or write failure
    #[error("file sink error for '{path}': {message}")]
    FileSink { path: String, message: String },

    /// Stream tap could not be installed
    #[error("stream tap installation failed: {0}")]
    TapInstall(String),

    /// Stream tap is not available on this platform
    #[error("stream tap is not supported on this platform")]
    TapUnsupported,

    /// Writer error (generic)
    #[error("writer error: {0}")]
    Writer(String),
}

impl LoggerError {
    /// Create a file sink error with the offending path
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a tap installation error
    pub fn tap_install(message: impl Into<String>) -> Self {
        LoggerError::TapInstall(message.into())
    }

    /// Create a writer error
    pub fn writer(message: impl Into<String>) -> Self {
        LoggerError::Writer(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::file_sink("/log/app", "permission denied");
        assert!(matches!(err, LoggerError::FileSink { .. }));

        let err = LoggerError::tap_install("dup2 failed");
        assert!(matches!(err, LoggerError::TapInstall(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_sink("/log/app", "permission denied");
        assert_eq!(
            err.to_string(),
            "file sink error for '/log/app': permission denied"
        );

        let err = LoggerError::tap_install("pipe() failed");
        assert_eq!(
            err.to_string(),
            "stream tap installation failed: pipe() failed"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err: LoggerError = io_err.into();
        assert!(matches!(err, LoggerError::Io(_)));
    }
}
