use crate::{
    gateways::{identity::IdentityError, image::ImageStoreError},
    repositories,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The name must not be empty")]
    EmptyName,
    #[error("The date is missing")]
    MissingDate,
    #[error("The time is missing")]
    MissingTime,
    #[error("The location zone is missing")]
    MissingZone,
    #[error("Invalid date, expected YYYY-MM-DD")]
    InvalidDate,
    #[error("Invalid time, expected HH:MM")]
    InvalidTime,
    #[error("The cost must be a non-negative number")]
    InvalidCost,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("The grade must be between 1 and 5")]
    InvalidGrade,
    #[error("Invalid limit")]
    InvalidLimit,
    #[error("Invalid sort key")]
    InvalidSortKey,
    #[error("Invalid sort order")]
    InvalidSortOrder,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("The password must contain at least 6 characters")]
    InvalidPassword,
    #[error("Invalid image folder")]
    InvalidImageFolder,
    #[error("Invalid image name")]
    InvalidImageName,
    #[error("The image is empty")]
    EmptyImage,
    #[error("The image exceeds the maximum size of {max_size} bytes")]
    ImageTooLarge { max_size: u64 },
    #[error("Only JPEG, PNG, GIF and WebP images are allowed")]
    UnsupportedImageType,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("This is not allowed")]
    Forbidden,
    #[error("Only admins may change roles")]
    RoleChangeForbidden,
    #[error("User profile not found")]
    ProfileNotFound,
    #[error("The event does not exist")]
    EventNotFound,
    #[error("The booking does not exist")]
    BookingNotFound,
    #[error("The review does not exist")]
    ReviewNotFound,
    #[error("{0} does not exist")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("You have already booked this event")]
    AlreadyBooked,
    #[error("You are already registered for this event")]
    AlreadyRegistered,
    #[error("You have already reviewed this event")]
    AlreadyReviewed,
    #[error("The email address is already registered")]
    EmailTaken,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Identity provider failure: {0}")]
    Identity(#[source] anyhow::Error),
    #[error("Image store failure: {0}")]
    ImageStore(#[source] anyhow::Error),
}

/// Categories of errors as they are reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Upstream,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::Upstream => "UpstreamError",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized | Self::InvalidCredentials => ErrorKind::Unauthorized,
            Self::Forbidden | Self::RoleChangeForbidden => ErrorKind::Forbidden,
            Self::ProfileNotFound
            | Self::EventNotFound
            | Self::BookingNotFound
            | Self::ReviewNotFound
            | Self::NotFound(_)
            | Self::Repo(repositories::Error::NotFound) => ErrorKind::NotFound,
            Self::AlreadyExists(_)
            | Self::AlreadyBooked
            | Self::AlreadyRegistered
            | Self::AlreadyReviewed
            | Self::EmailTaken
            | Self::Repo(repositories::Error::AlreadyExists) => ErrorKind::Conflict,
            Self::Repo(_) | Self::Identity(_) | Self::ImageStore(_) => ErrorKind::Upstream,
            _ => ErrorKind::Validation,
        }
    }
}

impl From<IdentityError> for Error {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailTaken => Self::EmailTaken,
            // Unknown accounts are indistinguishable from wrong passwords.
            IdentityError::InvalidCredentials | IdentityError::NotFound => {
                Self::InvalidCredentials
            }
            IdentityError::Other(err) => Self::Identity(err),
        }
    }
}

impl From<ImageStoreError> for Error {
    fn from(err: ImageStoreError) -> Self {
        match err {
            ImageStoreError::NotFound => Self::NotFound("The image"),
            ImageStoreError::Other(err) => Self::ImageStore(err),
        }
    }
}
