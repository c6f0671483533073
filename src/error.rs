use std::path::PathBuf;

/// Everything that can stop a palette extraction run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read folder {path}: {source}")]
    InputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read image {path}: {source}")]
    ImageAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {path} has no pixels")]
    EmptyImage { path: PathBuf },

    #[error("cluster count must be between 1 and {max}, got {clusters}")]
    InvalidClusterCount { clusters: usize, max: usize },

    /// Fewer distinct colors than requested clusters.
    #[error("only {distinct} distinct colors, cannot form {clusters} clusters")]
    Degenerate { distinct: usize, clusters: usize },

    #[error("cannot serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
