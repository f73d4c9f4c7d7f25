/// User facing error texts of the authentication screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMessage {
    ConnectionFailed,
    WebviewError,
    SslError,
    SslDateInvalid,
    SslExpired,
    SslIdMismatch,
    SslInvalid,
    SslNotYetValid,
    SslUntrusted,
    FailedSslHandshake,
    Authentication,
    ProxyAuthentication,
    AuthScheme,
    HostLookup,
}

impl ErrorMessage {
    pub fn text(&self) -> &'static str {
        match self {
            ErrorMessage::ConnectionFailed => "Unable to connect to Home Assistant.",
            ErrorMessage::WebviewError => {
                "There was an error loading Home Assistant, please review the connection settings and try again."
            }
            ErrorMessage::SslError => {
                "Unable to communicate with Home Assistant because of a SSL error. Please ensure your certificate is valid."
            }
            ErrorMessage::SslDateInvalid => "The date of the certificate is invalid.",
            ErrorMessage::SslExpired => "The certificate has expired.",
            ErrorMessage::SslIdMismatch => "The hostname does not match the certificate.",
            ErrorMessage::SslInvalid => {
                "A generic error occurred while validating the certificate."
            }
            ErrorMessage::SslNotYetValid => "The certificate is not yet valid.",
            ErrorMessage::SslUntrusted => "The certificate authority is not trusted.",
            ErrorMessage::FailedSslHandshake => "Failed to perform the SSL handshake.",
            ErrorMessage::Authentication => "User authentication failed on the server.",
            ErrorMessage::ProxyAuthentication => "User authentication failed on the proxy.",
            ErrorMessage::AuthScheme => "Unsupported authentication scheme (not basic or digest).",
            ErrorMessage::HostLookup => "Server or proxy hostname lookup failed.",
        }
    }
}

/// Certificate failure reported by the browser, `primary_error` is the platform code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslError {
    pub primary_error: i32,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslErrorKind {
    NotYetValid,
    Expired,
    IdMismatch,
    Untrusted,
    DateInvalid,
    Invalid,
}

impl SslErrorKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SslErrorKind::NotYetValid),
            1 => Some(SslErrorKind::Expired),
            2 => Some(SslErrorKind::IdMismatch),
            3 => Some(SslErrorKind::Untrusted),
            4 => Some(SslErrorKind::DateInvalid),
            5 => Some(SslErrorKind::Invalid),
            _ => None,
        }
    }

    pub fn message(&self) -> ErrorMessage {
        match self {
            SslErrorKind::NotYetValid => ErrorMessage::SslNotYetValid,
            SslErrorKind::Expired => ErrorMessage::SslExpired,
            SslErrorKind::IdMismatch => ErrorMessage::SslIdMismatch,
            SslErrorKind::Untrusted => ErrorMessage::SslUntrusted,
            SslErrorKind::DateInvalid => ErrorMessage::SslDateInvalid,
            SslErrorKind::Invalid => ErrorMessage::SslInvalid,
        }
    }
}

/// Load failure reported by the browser, `error_code` is the platform code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebResourceError {
    pub error_code: i32,
    pub description: String,
}

pub const ERROR_HOST_LOOKUP: i32 = -2;
pub const ERROR_UNSUPPORTED_AUTH_SCHEME: i32 = -3;
pub const ERROR_AUTHENTICATION: i32 = -4;
pub const ERROR_PROXY_AUTHENTICATION: i32 = -5;
pub const ERROR_FAILED_SSL_HANDSHAKE: i32 = -11;

fn load_error_message(code: i32) -> Option<ErrorMessage> {
    match code {
        ERROR_FAILED_SSL_HANDSHAKE => Some(ErrorMessage::FailedSslHandshake),
        ERROR_AUTHENTICATION => Some(ErrorMessage::Authentication),
        ERROR_PROXY_AUTHENTICATION => Some(ErrorMessage::ProxyAuthentication),
        ERROR_UNSUPPORTED_AUTH_SCHEME => Some(ErrorMessage::AuthScheme),
        ERROR_HOST_LOOKUP => Some(ErrorMessage::HostLookup),
        _ => None,
    }
}

/// Picks the dialog message: a known certificate failure first, then a
/// known load error code, otherwise `fallback`.
pub fn error_message(
    fallback: ErrorMessage,
    ssl_error: Option<&SslError>,
    error: Option<&WebResourceError>,
) -> ErrorMessage {
    if let Some(kind) = ssl_error.and_then(|e| SslErrorKind::from_code(e.primary_error)) {
        return kind.message();
    }
    error
        .and_then(|e| load_error_message(e.error_code))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssl(code: i32) -> SslError {
        SslError {
            primary_error: code,
            url: "https://ha.example.com".to_owned(),
        }
    }

    fn load(code: i32) -> WebResourceError {
        WebResourceError {
            error_code: code,
            description: String::new(),
        }
    }

    #[test]
    fn every_certificate_failure_has_its_message() {
        let expected = [
            (0, ErrorMessage::SslNotYetValid),
            (1, ErrorMessage::SslExpired),
            (2, ErrorMessage::SslIdMismatch),
            (3, ErrorMessage::SslUntrusted),
            (4, ErrorMessage::SslDateInvalid),
            (5, ErrorMessage::SslInvalid),
        ];
        for (code, message) in expected {
            assert_eq!(
                error_message(ErrorMessage::SslError, Some(&ssl(code)), None),
                message
            );
        }
    }

    #[test]
    fn unknown_certificate_failure_uses_fallback() {
        assert_eq!(
            error_message(ErrorMessage::SslError, Some(&ssl(42)), None),
            ErrorMessage::SslError
        );
    }

    #[test]
    fn load_errors_are_mapped() {
        let expected = [
            (-11, ErrorMessage::FailedSslHandshake),
            (-4, ErrorMessage::Authentication),
            (-5, ErrorMessage::ProxyAuthentication),
            (-3, ErrorMessage::AuthScheme),
            (-2, ErrorMessage::HostLookup),
        ];
        for (code, message) in expected {
            assert_eq!(
                error_message(ErrorMessage::WebviewError, None, Some(&load(code))),
                message
            );
        }
        assert_eq!(
            error_message(ErrorMessage::WebviewError, None, Some(&load(-8))),
            ErrorMessage::WebviewError
        );
        assert_eq!(
            error_message(ErrorMessage::WebviewError, None, None),
            ErrorMessage::WebviewError
        );
    }
}
