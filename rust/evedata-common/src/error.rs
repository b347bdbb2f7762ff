use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    /// An index (column, row, chain) beyond the bounds of its container.
    pub fn index_out_of_range(what: &'static str, index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { what, index, len }.into())
    }

    /// Array access on a scalar column, or scalar access on an array column.
    pub fn shape_mismatch(element: impl Into<String>, array_requested: bool) -> Error {
        Error(
            ErrorKind::ShapeMismatch {
                element: element.into(),
                array_requested,
            }
            .into(),
        )
    }

    pub fn type_mismatch(
        element: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::TypeMismatch {
                element: element.into(),
                expected: expected.into(),
                actual: actual.into(),
            }
            .into(),
        )
    }

    pub fn not_found(element: impl Into<String>) -> Error {
        Error(
            ErrorKind::NotFound {
                element: element.into(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Error {
        Error(
            ErrorKind::Json {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn arrow<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Arrow {
                context: context.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("{what} index {index} out of range (count: {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error(
        "shape mismatch for '{element}': {} access requested",
        if *array_requested { "array" } else { "scalar" })]
    ShapeMismatch {
        element: String,
        array_requested: bool,
    },

    #[error("type mismatch for '{element}': expected {expected}, found {actual}")]
    TypeMismatch {
        element: String,
        expected: String,
        actual: String,
    },

    #[error("'{element}' not found")]
    NotFound { element: String },

    #[error("invalid format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("JSON error for '{context}': {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    #[error("Arrow error: {context}")]
    Arrow {
        context: String,
        source: StdErrorBoxed,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::json("", e)
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(_: std::convert::Infallible) -> Self {
        Error::invalid_operation("conversion")
    }
}
