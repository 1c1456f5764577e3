use std::{rc::Rc, time::Duration};

use async_trait::async_trait;

use crate::api::{DeleteResponse, FormPassword, LikesResponse, SoneId, SoneStatus, Target};

/// The ajax endpoints of the web interface
///
/// Futures are not `Send`, as everything runs on the browser's event loop.
#[async_trait(?Send)]
pub trait Backend {
    async fn get_translation(&self, key: &str) -> anyhow::Result<String>;

    async fn get_sone_status(&self, sone: &SoneId) -> anyhow::Result<SoneStatus>;

    async fn delete(
        &self,
        target: &Target,
        form_password: &FormPassword,
    ) -> anyhow::Result<DeleteResponse>;

    async fn like(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()>;

    async fn unlike(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()>;

    async fn get_likes(&self, target: &Target) -> anyhow::Result<LikesResponse>;
}

#[async_trait(?Send)]
impl<B: Backend + ?Sized> Backend for Rc<B> {
    async fn get_translation(&self, key: &str) -> anyhow::Result<String> {
        (**self).get_translation(key).await
    }

    async fn get_sone_status(&self, sone: &SoneId) -> anyhow::Result<SoneStatus> {
        (**self).get_sone_status(sone).await
    }

    async fn delete(
        &self,
        target: &Target,
        form_password: &FormPassword,
    ) -> anyhow::Result<DeleteResponse> {
        (**self).delete(target, form_password).await
    }

    async fn like(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        (**self).like(target, form_password).await
    }

    async fn unlike(&self, target: &Target, form_password: &FormPassword) -> anyhow::Result<()> {
        (**self).unlike(target, form_password).await
    }

    async fn get_likes(&self, target: &Target) -> anyhow::Result<LikesResponse> {
        (**self).get_likes(target).await
    }
}

/// Timer used to space status polls
#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, d: Duration);
}

#[async_trait(?Send)]
impl<S: Sleeper + ?Sized> Sleeper for Rc<S> {
    async fn sleep(&self, d: Duration) {
        (**self).sleep(d).await
    }
}
