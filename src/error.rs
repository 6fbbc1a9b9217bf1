use std::io;
use thiserror::Error;

/// Errors surfaced by the visualization pipeline.
#[derive(Debug, Error)]
pub enum VizError {
    /// A requested word is absent from the embedding vocabulary.
    #[error("word `{0}` is not in the embedding vocabulary")]
    UnknownWord(String),
    /// The projection was handed fewer points than t-SNE can embed.
    #[error("projection needs at least 2 points, got {0}")]
    InsufficientPoints(usize),
    /// Writing the rendered figure failed.
    #[error("failed to write figure to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// The glyph file could not be loaded.
    #[error("failed to load font {path}: {reason}")]
    Font { path: String, reason: String },
    /// A word-vector file that does not follow the word2vec text format.
    #[error("malformed embedding file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    /// Low-level IO failures while reading inputs.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// Layout artifact (de)serialization failures.
    #[error("layout serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
