//! Convenient error handling

use crate::types::{Response, WSResult};
use std::fmt;
use tokio_tungstenite::tungstenite;

pub type HassResult<T> = std::result::Result<T, HassError>;

/// The error enum for the companion
#[derive(Debug)]
pub enum HassError {
    /// Returned when it is unable to authenticate
    AuthenticationFailed(String),

    /// Returned when serde was unable to deserialize the values
    UnableToDeserialize(serde_json::error::Error),

    /// Returned when connection has unexpected failed
    ConnectionClosed,

    /// Mpsc channel SendError<T> message
    SendError(String),

    /// Tungstenite error
    TungsteniteError(tungstenite::error::Error),

    /// Returned when an unknown message format is received
    UnknownPayloadReceived(Response),

    /// Returned when the websocket delivers a non text frame
    UnexpectedMessage(tungstenite::Message),

    /// Returned the error received from the Home Assistant Gateway
    ResponseError(WSResult),

    /// HTTP transport or status error from the REST endpoints
    Http(reqwest::Error),

    /// A server or redirect url could not be parsed
    InvalidUrl(url::ParseError),

    /// No server url has been saved yet
    MissingServerUrl,

    /// The requested entity is not known by Home Assistant
    EntityNotFound(String),

    /// Reading or writing a local store failed
    Io(std::io::Error),

    /// Returned for errors which do not fit any of the above criterias
    Generic(String),
}

impl std::error::Error for HassError {}

impl fmt::Display for HassError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionClosed => write!(f, "Connection closed unexpectedly"),
            Self::SendError(e) => write!(f, "Unable to send the message on channel: {}", e),
            Self::AuthenticationFailed(e) => write!(f, "Authentication has failed: {}", e),
            Self::UnableToDeserialize(e) => {
                write!(f, "Unable to deserialize the received value: {}", e)
            }
            Self::TungsteniteError(e) => write!(f, "Tungstenite Error: {}", e),
            Self::UnknownPayloadReceived(e) => write!(f, "The received payload is unknown {:?}", e),
            Self::UnexpectedMessage(e) => write!(f, "The received message is unexpected: {}", e),
            Self::ResponseError(e) => match &e.error {
                Some(e) => write!(
                    f,
                    "The error code:{} with the error message: {}",
                    e.code, e.message
                ),
                None => write!(f, "ResponseError({e:?})"),
            },
            Self::Http(e) => write!(f, "HTTP Error: {}", e),
            Self::InvalidUrl(e) => write!(f, "Invalid url: {}", e),
            Self::MissingServerUrl => write!(f, "No Home Assistant url has been saved"),
            Self::EntityNotFound(id) => write!(f, "Entity {} not found", id),
            Self::Io(e) => write!(f, "IO Error: {}", e),
            Self::Generic(detail) => write!(f, "Generic Error: {}", detail),
        }
    }
}

impl From<serde_json::error::Error> for HassError {
    fn from(error: serde_json::error::Error) -> Self {
        HassError::UnableToDeserialize(error)
    }
}

impl From<tungstenite::error::Error> for HassError {
    fn from(error: tungstenite::error::Error) -> Self {
        match error {
            tungstenite::error::Error::ConnectionClosed => HassError::ConnectionClosed,
            _ => HassError::TungsteniteError(error),
        }
    }
}

impl From<reqwest::Error> for HassError {
    fn from(error: reqwest::Error) -> Self {
        HassError::Http(error)
    }
}

impl From<url::ParseError> for HassError {
    fn from(error: url::ParseError) -> Self {
        HassError::InvalidUrl(error)
    }
}

impl From<std::io::Error> for HassError {
    fn from(error: std::io::Error) -> Self {
        HassError::Io(error)
    }
}
