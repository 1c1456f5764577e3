use crate::Kind;

/// Failure reported by the web interface in the `error` field of a
/// deletion response
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0:?}")]
    Unknown(String),

    #[error("Invalid post id")]
    InvalidPostId,

    #[error("Invalid reply id")]
    InvalidReplyId,

    #[error("Authentication required")]
    AuthRequired,

    #[error("Not authorized to delete this {0}")]
    NotAuthorized(Kind),
}

impl Error {
    pub fn code(&self) -> &str {
        match self {
            Error::Unknown(code) => code,
            Error::InvalidPostId => "invalid-post-id",
            Error::InvalidReplyId => "invalid-reply-id",
            Error::AuthRequired => "auth-required",
            Error::NotAuthorized(_) => "not-authorized",
        }
    }

    /// `kind` is the kind of thing the failed request was about, as the codes
    /// themselves do not always say
    pub fn parse(code: &str, kind: Kind) -> Error {
        match code {
            "invalid-post-id" => Error::InvalidPostId,
            "invalid-reply-id" => Error::InvalidReplyId,
            "auth-required" => Error::AuthRequired,
            "not-authorized" => Error::NotAuthorized(kind),
            _ => Error::Unknown(String::from(code)),
        }
    }

    /// Text shown to the user in a blocking alert
    pub fn message(&self) -> String {
        match self {
            Error::Unknown(code) if code.is_empty() => String::from("Deletion failed."),
            Error::Unknown(code) => format!("Deletion failed: {code}"),
            Error::InvalidPostId => String::from("Invalid post ID given!"),
            Error::InvalidReplyId => String::from("Invalid reply ID given!"),
            Error::AuthRequired => String::from("You need to be logged in."),
            Error::NotAuthorized(kind) => format!("You are not allowed to delete this {kind}."),
        }
    }
}
