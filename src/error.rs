use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("no tag is selected")]
    NoTagSelected,

    #[error("the root tag cannot be saved")]
    RootTagNotPersisted,

    #[error("a new {0} cannot already have an id")]
    IdExists(&'static str),

    #[error("incomplete form: {0}")]
    IncompleteForm(&'static str),

    #[error("file extension {0:?} is not allowed")]
    UnsupportedExtension(String),

    #[error("invalid {name} header: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
