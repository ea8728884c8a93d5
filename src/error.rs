use thiserror::Error;

/// Errors produced by the generator.
///
/// Resolution never fails: unknown base types, intersections, tuples and
/// ambiguous unions collapse to `any` rather than erroring.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid meta-model at JSON path {path}: {source}")]
    /// The meta-model document failed to deserialize.
    Load {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("generate {file}: {source}")]
    /// Emission of one of the output files failed.
    Emit {
        file: &'static str,
        #[source]
        source: std::fmt::Error,
    },

    #[error("I/O error: {0}")]
    /// Reading a local meta-model file failed.
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    /// Downloading the meta-model failed (transport or non-success status).
    Http(#[from] reqwest::Error),
}
