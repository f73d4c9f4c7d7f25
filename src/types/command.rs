use serde::Serialize;
use serde_json::Value;
use tokio_tungstenite::tungstenite::Message as TungsteniteMessage;

/// This enum defines the type of commands that the client is allowed to send to the Websocket server
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Command {
    AuthInit(Auth),
    GetStates(Ask),
    CallService(CallService),
}

impl Command {
    /// This function transform a command into a TungsteniteMessage
    pub(crate) fn to_tungstenite_message(self) -> crate::HassResult<TungsteniteMessage> {
        let cmd_str = serde_json::to_string(&self)?;
        Ok(TungsteniteMessage::text(cmd_str))
    }
}

//used to authenticate the session
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct Auth {
    #[serde(rename = "type")]
    pub(crate) msg_type: String,
    pub(crate) access_token: String,
}

//used to fetch from server
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct Ask {
    pub(crate) id: u64,
    #[serde(rename = "type")]
    pub(crate) msg_type: String,
}

//used to call a service
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct CallService {
    pub(crate) id: u64,
    #[serde(rename = "type")]
    pub(crate) msg_type: String,
    pub(crate) domain: String,
    pub(crate) service: String,
    pub(crate) service_data: Option<Value>,
}
