use crate::HassResult;

use serde::Deserialize;
use serde_json::Value;

///The tag identifying which variant we are dealing with is inside of the content,
/// next to any other fields of the variant.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    //request to autheticate
    AuthRequired(AuthRequired),
    //authetication suceeded
    #[allow(unused)]
    AuthOk(AuthOk),
    //authetication failed
    AuthInvalid(AuthInvalid),
    //general response from server
    Result(WSResult),
}

impl Response {
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::AuthRequired(_) | Self::AuthOk(_) | Self::AuthInvalid(_) => None,
            Self::Result(result) => Some(result.id),
        }
    }
}

// this is the first message received from websocket,
// that ask to provide a authetication method
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AuthRequired {
    pub ha_version: String,
}

// this is received when the service successfully autheticate
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AuthOk {
    pub ha_version: String,
}

// this is received if the authetication failed
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AuthInvalid {
    pub message: String,
}

///this is the general response from the Websocket server when a request has been sent
///
/// if "success" is true, then the "result" can be checked
/// if "success" is false, then the "error" should be further explored
#[derive(Debug, Deserialize, PartialEq)]
pub struct WSResult {
    pub id: u64,
    success: bool,
    result: Option<Value>,
    pub(crate) error: Option<ErrorCode>,
}

impl WSResult {
    pub fn is_ok(&self) -> bool {
        self.success
    }

    pub fn is_err(&self) -> bool {
        !self.success
    }

    /// The payload of a successful result; `call_service` may answer with a null result.
    pub fn result(self) -> HassResult<Value> {
        if self.success {
            return Ok(self.result.unwrap_or(Value::Null));
        }
        Err(crate::HassError::ResponseError(self))
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ErrorCode {
    pub code: String,
    pub message: String,
}
