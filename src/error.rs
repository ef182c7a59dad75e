// SPDX-License-Identifier: MPL-2.0
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The file is missing, corrupt, or cannot be decoded as an image.
    ImageUnreadable { path: PathBuf, reason: String },

    /// A registry index outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },

    /// The reference is not a member of the registry.
    NotRegistered(PathBuf),

    /// The file extension is not in the accepted list.
    UnsupportedFormat(PathBuf),

    /// A GPS block lacks the named coordinate triple.
    MissingField(String),

    /// A tag value could not be decoded as text.
    ///
    /// Only logged during extraction; never returned by `extract`.
    TagDecoding(String),

    Io(String),
    Config(String),
}

impl Error {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Error::ImageUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true for errors caused by the caller breaking the registry
    /// contract rather than by a runtime condition.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. } | Error::NotRegistered(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ImageUnreadable { path, reason } => {
                write!(f, "Image unreadable: {}: {}", path.display(), reason)
            }
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Index out of range: {} (len {})", index, len)
            }
            Error::NotRegistered(path) => write!(f, "Image not registered: {}", path.display()),
            Error::UnsupportedFormat(path) => {
                write!(f, "Unsupported image format: {}", path.display())
            }
            Error::MissingField(field) => write!(f, "Missing GPS field: {}", field),
            Error::TagDecoding(e) => write!(f, "Tag decoding error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
