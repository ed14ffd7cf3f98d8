use super::json_error_response;
use anyhow::anyhow;
use eventhub_application::error::{AppError, BError};
pub use eventhub_core::{
    repositories::Error as RepoError,
    usecases::{Error as ParameterError, ErrorKind},
};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Malformed payloads are validation errors.
impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::BadRequest),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!("Invalid JSON: {err}"), Status::BadRequest)
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

pub fn status_of_kind(kind: ErrorKind) -> Status {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict => Status::BadRequest,
        ErrorKind::Unauthorized => Status::Unauthorized,
        ErrorKind::Forbidden => Status::Forbidden,
        ErrorKind::NotFound => Status::NotFound,
        ErrorKind::Upstream => Status::InternalServerError,
    }
}

/// Name of the error category that is reported for a plain status code.
pub fn kind_of_status(status: Status) -> ErrorKind {
    match status.code {
        401 => ErrorKind::Unauthorized,
        403 => ErrorKind::Forbidden,
        404 => ErrorKind::NotFound,
        400..=499 => ErrorKind::Validation,
        _ => ErrorKind::Upstream,
    }
}

fn repo_error_kind(err: &RepoError) -> ErrorKind {
    match err {
        RepoError::NotFound => ErrorKind::NotFound,
        RepoError::AlreadyExists => ErrorKind::Conflict,
        RepoError::Other(_) => ErrorKind::Upstream,
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        let kind = match &self {
            Error::App(AppError::Business(BError::Parameter(err))) => err.kind(),
            Error::App(AppError::Business(BError::Repo(err))) => repo_error_kind(err),
            Error::App(AppError::Other(_)) | Error::Other(_) => ErrorKind::Upstream,
            Error::OtherWithStatus(_, status) => kind_of_status(*status),
        };
        let status = match &self {
            Error::OtherWithStatus(_, status) => *status,
            _ => status_of_kind(kind),
        };
        if status.code >= 500 {
            error!("Error: {self}");
            return json_error_response(req, kind, &"Internal server error", status);
        }
        debug!("Request {} {} failed: {self}", req.method(), req.uri());
        json_error_response(req, kind, &self, status)
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}
