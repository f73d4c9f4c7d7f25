//! Home Assistant websocket client

use crate::types::{Ask, Auth, CallService, Command, HassEntity, Response};
use crate::{HassError, HassResult};

use futures_util::{stream::SplitStream, Sink, SinkExt, StreamExt};
use log::{debug, warn};
use serde_json::Value;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio_tungstenite::tungstenite::{Error, Message};
use tokio_tungstenite::{connect_async, WebSocketStream};

/// HassClient simplifies the conversation with the Home Assistant websocket server,
/// it creates the requests and reads the replies for the few commands the companion needs
pub struct HassClient {
    // holds the id of the WS message
    last_sequence: AtomicU64,

    /// Client --> Gateway (send "Commands" msg to the Gateway)
    message_tx: Pin<Box<dyn Sink<Message, Error = Error> + Send + Sync>>,

    /// Gateway --> Client (receive "Response" msg from the Gateway)
    from_gateway: Receiver<Result<Message, Error>>,
}

async fn ws_incoming_messages(
    mut stream: SplitStream<WebSocketStream<impl AsyncRead + AsyncWrite + Unpin>>,
    to_user: Sender<Result<Message, Error>>,
) {
    loop {
        let message = tokio::select! {
            // the client was dropped, release the connection
            _ = to_user.closed() => break,
            message = stream.next() => match message {
                Some(message) => message,
                None => break,
            },
        };
        // keepalive frames are answered by tungstenite itself
        if let Ok(Message::Ping(_) | Message::Pong(_)) = message {
            continue;
        }
        if to_user.send(message).await.is_err() {
            break;
        }
    }
    debug!("websocket reader finished");
}

impl HassClient {
    pub async fn new(url: &str) -> HassResult<Self> {
        let (wsclient, _) = connect_async(url).await?;
        let (message_tx, stream) = wsclient.split();

        let (to_user, from_gateway) = channel(20);

        tokio::spawn(ws_incoming_messages(stream, to_user));

        let last_sequence = AtomicU64::new(1);

        Ok(Self {
            last_sequence,
            message_tx: Box::pin(message_tx),
            from_gateway,
        })
    }

    /// authenticate the session using a long-lived access token
    ///
    /// When a client connects to the server, the server sends out auth_required.
    /// The first message from the client should be an auth message.
    /// If the data is incorrect, the server will reply with auth_invalid message and disconnect the session.
    pub async fn auth_with_longlivedtoken(&mut self, token: &str) -> HassResult<()> {
        // Auth Request from Gateway { "type": "auth_required"}
        match self.ws_receive().await? {
            Response::AuthRequired(_) => {}
            unknown => {
                warn!("expecting auth_required as first message");
                return Err(HassError::UnknownPayloadReceived(unknown));
            }
        }

        let auth_message = Command::AuthInit(Auth {
            msg_type: "auth".to_owned(),
            access_token: token.to_owned(),
        });

        let response = self.command(auth_message).await?;

        // Check if the authetication was succefully, should receive {"type": "auth_ok"}
        match response {
            Response::AuthOk(_) => Ok(()),
            Response::AuthInvalid(err) => Err(HassError::AuthenticationFailed(err.message)),
            unknown => Err(HassError::UnknownPayloadReceived(unknown)),
        }
    }

    /// This will get all the current states from Home Assistant.
    ///
    /// The server will respond with a result message containing the states.
    pub async fn get_states(&mut self) -> HassResult<Vec<HassEntity>> {
        let id = self.get_last_seq();

        let states_req = Command::GetStates(Ask {
            id,
            msg_type: "get_states".to_owned(),
        });
        let response = self.command(states_req).await?;

        match response {
            Response::Result(data) => {
                let value = data.result()?;
                let states: Vec<HassEntity> = serde_json::from_value(value)?;
                Ok(states)
            }
            unknown => Err(HassError::UnknownPayloadReceived(unknown)),
        }
    }

    /// This will call a service in Home Assistant.
    ///
    /// The server will indicate with a message that the service is done executing.
    /// <https://developers.home-assistant.io/docs/api/websocket#calling-a-service>
    pub async fn call_service(
        &mut self,
        domain: String,
        service: String,
        service_data: Option<Value>,
    ) -> HassResult<()> {
        let id = self.get_last_seq();

        let services_req = Command::CallService(CallService {
            id,
            msg_type: "call_service".to_owned(),
            domain,
            service,
            service_data,
        });
        let response = self.command(services_req).await?;

        match response {
            Response::Result(data) => {
                data.result()?;
                Ok(())
            }
            unknown => Err(HassError::UnknownPayloadReceived(unknown)),
        }
    }

    /// send commands and receive responses from the gateway
    pub(crate) async fn command(&mut self, cmd: Command) -> HassResult<Response> {
        let cmd_tungstenite = cmd.to_tungstenite_message()?;

        self.message_tx
            .send(cmd_tungstenite)
            .await
            .map_err(|err| HassError::SendError(err.to_string()))?;

        self.ws_receive().await
    }

    /// read the messages from the Websocket connection
    pub(crate) async fn ws_receive(&mut self) -> HassResult<Response> {
        match self.from_gateway.recv().await {
            Some(Ok(item)) => match item {
                Message::Text(data) => {
                    let payload: Response = serde_json::from_str(data.as_str())?;
                    Ok(payload)
                }
                Message::Close(_) => Err(HassError::ConnectionClosed),
                msg => Err(HassError::UnexpectedMessage(msg)),
            },
            Some(Err(error)) => Err(HassError::from(error)),

            None => Err(HassError::ConnectionClosed),
        }
    }

    /// get message sequence required by the Websocket server
    fn get_last_seq(&self) -> u64 {
        self.last_sequence.fetch_add(1, Ordering::Relaxed)
    }
}
