use crate::{Error, Kind};

/// Body of a `getTranslation` response
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Translation {
    pub value: String,
}

/// Body of a `deletePost` or `deleteReply` response
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteResponse {
    pub fn success() -> DeleteResponse {
        DeleteResponse {
            success: true,
            error: None,
        }
    }

    pub fn failure(err: &Error) -> DeleteResponse {
        DeleteResponse {
            success: false,
            error: Some(String::from(err.code())),
        }
    }

    /// Ok(()) iff the server reported the deletion as done
    pub fn into_result(self, kind: Kind) -> Result<(), Error> {
        match (self.success, self.error) {
            (true, _) => Ok(()),
            (false, Some(code)) => Err(Error::parse(&code, kind)),
            (false, None) => Err(Error::Unknown(String::new())),
        }
    }
}

/// Body of a `getLikes` response
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LikesResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub likes: u64,
}

impl LikesResponse {
    pub fn likes(&self) -> Option<u64> {
        self.success.then_some(self.likes)
    }
}
