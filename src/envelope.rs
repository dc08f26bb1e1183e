use axum::http::StatusCode;
use serde::Serialize;

/// Response wrapper used by the auth, user and comment routes.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub code: u16,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            code: StatusCode::OK.as_u16(),
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            code: status.as_u16(),
            data: None,
            message: Some(message.into()),
        }
    }
}
