use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid decode target: {message}")]
    InvalidTarget { message: String },

    #[error("failed to parse document: {source}")]
    DocumentParse {
        #[source]
        source: std::io::Error,
    },

    #[error("invalid xpath '{expr}': {message}")]
    QuerySyntax { expr: String, message: String },

    #[error("failed to evaluate xpath '{expr}': {message}")]
    QueryEvaluation { expr: String, message: String },

    #[error("invalid xpath for map '{expr}': expected '<key_xpath>;<value_xpath>'")]
    InvalidTag { expr: String },

    #[error("cannot convert '{text}' matched by '{expr}': {source}")]
    Conversion {
        expr: String,
        text: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("unsupported type: {type_name}")]
    UnsupportedType { type_name: String },

    #[error("field {path}: {source}")]
    AtField {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The error without any field path attached at the decode boundary.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::AtField { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Dotted path of the field that failed, when known.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Error::AtField { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn at_field(self, path: String) -> Self {
        if path.is_empty() {
            return self;
        }
        match self {
            Error::AtField { .. } => self,
            other => Error::AtField {
                path,
                source: Box::new(other),
            },
        }
    }
}
