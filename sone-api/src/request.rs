use anyhow::Context;

use crate::{FormPassword, SoneId, Target};

/// Path under the web interface's base url where all endpoints live
pub const AJAX_PREFIX: &str = "ajax/";

/// One call to an ajax endpoint of the web interface
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    GetTranslation { key: String },
    GetSoneStatus { sone: SoneId },
    Delete { target: Target, form_password: FormPassword },
    Like { target: Target, form_password: FormPassword },
    Unlike { target: Target, form_password: FormPassword },
    GetLikes { target: Target },
}

impl Request {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Request::GetTranslation { .. } => "getTranslation",
            Request::GetSoneStatus { .. } => "getSoneStatus",
            Request::Delete {
                target: Target::Post(_),
                ..
            } => "deletePost",
            Request::Delete {
                target: Target::Reply(_),
                ..
            } => "deleteReply",
            Request::Like { .. } => "like",
            Request::Unlike { .. } => "unlike",
            Request::GetLikes { .. } => "getLikes",
        }
    }

    /// Path of the endpoint, relative to the web interface's base url
    pub fn path(&self) -> String {
        format!("{}{}.ajax", AJAX_PREFIX, self.endpoint())
    }

    /// Query parameters, in the order the web interface sends them
    pub fn query(&self) -> Vec<(&'static str, &str)> {
        match self {
            Request::GetTranslation { key } => vec![("key", key.as_str())],
            Request::GetSoneStatus { sone } => vec![("sone", sone.0.as_str())],
            Request::Delete {
                target,
                form_password,
            } => vec![
                (target.kind().as_str(), target.id()),
                ("formPassword", form_password.0.as_str()),
            ],
            Request::Like {
                target,
                form_password,
            }
            | Request::Unlike {
                target,
                form_password,
            } => vec![
                ("type", target.kind().as_str()),
                (target.kind().as_str(), target.id()),
                ("formPassword", form_password.0.as_str()),
            ],
            Request::GetLikes { target } => vec![
                ("type", target.kind().as_str()),
                (target.kind().as_str(), target.id()),
            ],
        }
    }

    /// Full url of this request, `base` being the url of the web interface
    /// (with its trailing slash)
    pub fn url(&self, base: &url::Url) -> anyhow::Result<url::Url> {
        let mut url = base
            .join(&self.path())
            .with_context(|| format!("joining {:?} onto base url {}", self.path(), base))?;
        url.query_pairs_mut().extend_pairs(self.query());
        Ok(url)
    }
}
