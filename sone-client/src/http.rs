use anyhow::Context;
use async_trait::async_trait;

use crate::{
    api::{
        DeleteResponse, FormPassword, LikesResponse, Request, SoneId, SoneStatus, Target,
        Translation,
    },
    Backend,
};

/// `Backend` talking to a running web interface
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: url::Url,
}

impl HttpBackend {
    /// `base` is the url of the web interface, eg. `http://localhost:8888/Sone/`
    pub fn new(base: url::Url) -> HttpBackend {
        HttpBackend {
            client: reqwest::Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &url::Url {
        &self.base
    }

    async fn send(&self, req: &Request) -> anyhow::Result<reqwest::Response> {
        let url = req.url(&self.base)?;
        tracing::trace!(%url, "sending ajax request");
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("sending {} request", req.endpoint()))?
            .error_for_status()
            .with_context(|| format!("{} request was not successful", req.endpoint()))
    }

    async fn fetch<R>(&self, req: Request) -> anyhow::Result<R>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        self.send(&req)
            .await?
            .json()
            .await
            .with_context(|| format!("parsing {} response", req.endpoint()))
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn get_translation(&self, key: &str) -> anyhow::Result<String> {
        let t: Translation = self
            .fetch(Request::GetTranslation {
                key: String::from(key),
            })
            .await?;
        Ok(t.value)
    }

    async fn get_sone_status(&self, sone: &SoneId) -> anyhow::Result<SoneStatus> {
        self.fetch(Request::GetSoneStatus { sone: sone.clone() })
            .await
    }

    async fn delete(
        &self,
        target: &Target,
        form_password: &FormPassword,
    ) -> anyhow::Result<DeleteResponse> {
        self.fetch(Request::Delete {
            target: target.clone(),
            form_password: form_password.clone(),
        })
        .await
    }

    async fn like(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        self.send(&Request::Like {
            target: target.clone(),
            form_password: form_password.clone(),
        })
        .await?;
        Ok(())
    }

    async fn unlike(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        self.send(&Request::Unlike {
            target: target.clone(),
            form_password: form_password.clone(),
        })
        .await?;
        Ok(())
    }

    async fn get_likes(&self, target: &Target) -> anyhow::Result<LikesResponse> {
        self.fetch(Request::GetLikes {
            target: target.clone(),
        })
        .await
    }
}
