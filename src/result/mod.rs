use std::convert::From;

pub type Result<D> = core::result::Result<D, Error>;

/// Failure taxonomy of the controller layer.
///
/// `Validation` is raised before any network call is made, `Server` carries
/// whatever the backend reported, everything else is a transport or decode
/// problem that the notification layer collapses into a generic message.
#[derive(Debug)]
pub enum Error {
    Validation(String),
    NetworkConnectTimeout(reqwest::Error),
    NetworkReadTimeout(reqwest::Error),
    Transport(reqwest::Error),
    Server {
        status: u16,
        message: Option<String>,
    },
    InvalidJsonStructure(serde_json::Error),
    ErrorWithMessage(String),
}

impl Error {
    /// Server-supplied message if there is one, `None` for everything the
    /// backend never got a chance to describe.
    pub fn reported_message(&self) -> Option<&str> {
        match self {
            Self::Validation(m) => Some(m),
            Self::Server {
                message: Some(m), ..
            } => Some(m),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Error::NetworkConnectTimeout(err)
        } else if err.is_timeout() {
            Error::NetworkReadTimeout(err)
        } else {
            Error::Transport(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidJsonStructure(err)
    }
}
