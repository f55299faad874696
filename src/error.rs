/// Errors produced while reading or parsing source units.
#[derive(Debug, thiserror::Error)]
pub enum ExportsError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported extension: .{0}")]
    UnsupportedExtension(String),

    #[error("parse failed: {0}")]
    ParseFailed(String),
}
