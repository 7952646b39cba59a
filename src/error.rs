use std::path::PathBuf;

/// Errors surfaced by the library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot access {path:?}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("field `{field}` is not a sequence")]
    NotASequence { field: String },

    #[error("field `{field}` entry {index}: cannot read {value} as a timestamp")]
    Timestamp {
        field: String,
        index: usize,
        value: String,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("malformed npy file: {0}")]
    Npy(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(
        "snapshot `{label}` has format version {found}, expected {expected}"
    )]
    IncompatibleSnapshot {
        label: String,
        found: u32,
        expected: u32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }
}
