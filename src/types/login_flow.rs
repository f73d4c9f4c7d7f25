use serde::{Deserialize, Serialize};

/// Reply of `POST /auth/login_flow`, identifies a running login flow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginFlowInit {
    #[serde(rename = "type")]
    pub flow_type: String,
    pub flow_id: String,
    #[serde(default)]
    pub handler: Vec<Option<String>>,
    #[serde(default)]
    pub step_id: String,
}

/// Body sent to `POST /auth/login_flow`
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct LoginFlowRequest<'a> {
    pub(crate) client_id: &'a str,
    pub(crate) handler: [Option<&'a str>; 2],
    pub(crate) redirect_uri: &'a str,
}

/// Tokens returned by the authorization code exchange on `POST /auth/token`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub token_type: String,
}
