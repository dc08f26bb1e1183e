use serde::Deserialize;

/// Body of `POST /comment`. A client-supplied `date` is accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    pub username: String,
    pub content: String,
}
