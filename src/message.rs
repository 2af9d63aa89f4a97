use std::fmt;

use serde::Serialize;

use crate::error::Error;
use crate::utils::upload::ALLOWED_EXTENSIONS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Tag,
    Photo,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Tag => write!(f, "tag"),
            EntityKind::Photo => write!(f, "photo"),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub enum AppSuccess {
    Created(EntityKind),
    Updated(EntityKind),
    Deleted(EntityKind),
    UploadedPhoto,
}

impl AppSuccess {
    pub fn message(&self) -> String {
        match self {
            AppSuccess::Created(kind) => format!("A new {kind} was created."),
            AppSuccess::Updated(kind) => format!("The {kind} was updated."),
            AppSuccess::Deleted(kind) => format!("The {kind} was deleted."),
            AppSuccess::UploadedPhoto => "The photo was uploaded.".to_string(),
        }
    }
}

/// Alerts shown to the user. Every backend failure collapses into one of these;
/// the view stays interactive after any of them.
#[derive(Debug, PartialEq, Serialize)]
pub enum AppError {
    RequestFailed,
    NotFound,
    NoTagSelected,
    UnsupportedFile(String),
    IncompleteForm(&'static str),
    RootTagReadOnly,
    InvalidConfiguration,
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            AppError::RequestFailed => "The server could not complete the request.".to_string(),
            AppError::NotFound => "The requested item no longer exists.".to_string(),
            AppError::NoTagSelected => "Select a tag first.".to_string(),
            AppError::UnsupportedFile(ext) => format!(
                "Files of type \"{ext}\" cannot be uploaded. Allowed: {}.",
                ALLOWED_EXTENSIONS.join(", ")
            ),
            AppError::IncompleteForm(missing) => format!("Please provide {missing}."),
            AppError::RootTagReadOnly => "The root tag cannot be edited.".to_string(),
            AppError::InvalidConfiguration => "The client is misconfigured.".to_string(),
        }
    }
}

impl From<&Error> for AppError {
    fn from(error: &Error) -> Self {
        match error {
            Error::NotFound(_) => AppError::NotFound,
            Error::NoTagSelected => AppError::NoTagSelected,
            Error::UnsupportedExtension(ext) => AppError::UnsupportedFile(ext.clone()),
            Error::IncompleteForm(missing) => AppError::IncompleteForm(*missing),
            Error::RootTagNotPersisted => AppError::RootTagReadOnly,
            Error::Config(_) => AppError::InvalidConfiguration,
            Error::Http(_)
            | Error::Status { .. }
            | Error::IdExists(_)
            | Error::InvalidHeader { .. }
            | Error::Io(_) => AppError::RequestFailed,
        }
    }
}
