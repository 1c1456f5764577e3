use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct PostId(pub String);

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct ReplyId(pub String);

/// Per-page anti-forgery token, required on every mutating request
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormPassword(pub String);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Post,
    Reply,
}

impl Kind {
    /// Value of the `type` parameter, which is also the name of the
    /// parameter carrying the id
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Post => "post",
            Kind::Reply => "reply",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can be liked or deleted
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Target {
    Post(PostId),
    Reply(ReplyId),
}

impl Target {
    pub fn post(id: impl Into<String>) -> Target {
        Target::Post(PostId(id.into()))
    }

    pub fn reply(id: impl Into<String>) -> Target {
        Target::Reply(ReplyId(id.into()))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Target::Post(_) => Kind::Post,
            Target::Reply(_) => Kind::Reply,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Target::Post(PostId(id)) | Target::Reply(ReplyId(id)) => id,
        }
    }

    pub fn confirm_delete_key(&self) -> &'static str {
        match self {
            Target::Post(_) => crate::KEY_CONFIRM_DELETE_POST,
            Target::Reply(_) => crate::KEY_CONFIRM_DELETE_REPLY,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}
