use std::path::PathBuf;

/// Broad classes of export failure, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// There was nothing selected to export.
    NoActiveObject,
    /// The output couldn't be created or written.
    Io,
    /// The mesh couldn't be turned into an indexed triangle list.
    Geometry,
}

/// Errors related to exporting [Scenes](hedron::Scene).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no active object to export")]
    NoActiveObject,
    #[error("object {object:?} has no faces to export")]
    EmptyMesh { object: String },
    #[error(transparent)]
    Triangulate(#[from] hedron::TriangulateError),
    #[error("{count} corner vertices can't be indexed by {index_type}")]
    IndexOverflow {
        count: usize,
        index_type: &'static str,
    },
    #[error("couldn't write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't write output: {0}")]
    Write(#[source] std::io::Error),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NoActiveObject => ErrorCategory::NoActiveObject,
            Error::Io { .. } | Error::Write(_) => ErrorCategory::Io,
            Error::EmptyMesh { .. } | Error::Triangulate(_) | Error::IndexOverflow { .. } => {
                ErrorCategory::Geometry
            }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
