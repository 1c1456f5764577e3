use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use anyhow::{anyhow, Context};
use futures::{future::LocalBoxFuture, FutureExt};

use crate::{
    api::{FormPassword, PostId, SoneId, Target},
    Backend, DeletePhase, DeleteView, LikeView, Page, PollConfig, Poller, ReplyFormView, Sleeper,
    SwapConfig, SwapId, SwapView, WatchRegistry,
};

/// Enhances one page: owns the watch registry and the view of every element
/// it touched
///
/// Cloning gives another handle to the same controller.
pub struct Controller<B, P, S> {
    inner: Rc<Inner<B, P, S>>,
}

struct Inner<B, P, S> {
    backend: B,
    page: P,
    sleeper: S,
    config: PollConfig,
    registry: WatchRegistry,
    likes: RefCell<HashMap<Target, LikeView>>,
    deletes: RefCell<HashMap<Target, DeleteView>>,
    swaps: RefCell<HashMap<SwapId, (SwapConfig, SwapView)>>,
    next_swap: Cell<usize>,
    reply_forms: RefCell<HashMap<PostId, ReplyFormView>>,
}

impl<B, P, S> Clone for Controller<B, P, S> {
    fn clone(&self) -> Self {
        Controller {
            inner: self.inner.clone(),
        }
    }
}

impl<B, P, S> Controller<B, P, S>
where
    B: Backend + 'static,
    P: Page + 'static,
    S: Sleeper + 'static,
{
    pub fn new(backend: B, page: P, sleeper: S, config: PollConfig) -> Self {
        Controller {
            inner: Rc::new(Inner {
                backend,
                page,
                sleeper,
                config,
                registry: WatchRegistry::new(),
                likes: RefCell::new(HashMap::new()),
                deletes: RefCell::new(HashMap::new()),
                swaps: RefCell::new(HashMap::new()),
                next_swap: Cell::new(0),
                reply_forms: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn page(&self) -> &P {
        &self.inner.page
    }

    fn form_password(&self) -> anyhow::Result<FormPassword> {
        self.inner
            .page
            .form_password()
            .ok_or_else(|| anyhow!("no form password on the page"))
    }

    // Status polling

    /// Start watching `sone`
    ///
    /// Returns the polling loop the first time a sone is watched, and `None`
    /// afterwards. The caller is responsible for spawning it.
    pub fn watch(&self, sone: SoneId) -> Option<LocalBoxFuture<'static, ()>> {
        if !self.inner.registry.register(&sone) {
            tracing::trace!(%sone, "sone already watched");
            return None;
        }
        tracing::debug!(%sone, "watching sone");
        let this = self.clone();
        Some(
            async move {
                let i = &this.inner;
                Poller::new(&i.backend, &i.page, &i.sleeper, &i.config)
                    .run(sone)
                    .await
            }
            .boxed_local(),
        )
    }

    pub fn is_watched(&self, sone: &SoneId) -> bool {
        self.inner.registry.is_watched(sone)
    }

    // Likes

    pub async fn like(&self, target: Target) -> anyhow::Result<()> {
        self.set_liked(target, true).await
    }

    pub async fn unlike(&self, target: Target) -> anyhow::Result<()> {
        self.set_liked(target, false).await
    }

    async fn set_liked(&self, target: Target, liked: bool) -> anyhow::Result<()> {
        let form_password = self.form_password()?;
        let backend = &self.inner.backend;
        let res = match liked {
            true => backend.like(&target, &form_password).await,
            false => backend.unlike(&target, &form_password).await,
        };
        res.with_context(|| format!("setting liked={liked} on {target}"))?;
        tracing::debug!(%target, liked, "like state changed");
        self.update_likes(&target, |v| v.liked = Some(liked));

        // Only fetch the count now, so that it includes the change
        self.refresh_likes(&target).await?;
        Ok(())
    }

    /// Fetch and display the like count of `target`
    pub async fn refresh_likes(&self, target: &Target) -> anyhow::Result<Option<u64>> {
        let resp = self
            .inner
            .backend
            .get_likes(target)
            .await
            .with_context(|| format!("fetching likes of {target}"))?;
        let likes = resp.likes();
        match likes {
            Some(n) => self.update_likes(target, |v| v.likes = Some(n)),
            None => tracing::debug!(%target, "server did not return likes"),
        }
        Ok(likes)
    }

    fn update_likes(&self, target: &Target, f: impl FnOnce(&mut LikeView)) {
        let view = {
            let mut likes = self.inner.likes.borrow_mut();
            let view = likes.entry(target.clone()).or_default();
            f(view);
            view.clone()
        };
        self.inner.page.render_likes(target, &view);
    }

    pub fn like_view(&self, target: &Target) -> Option<LikeView> {
        self.inner.likes.borrow().get(target).cloned()
    }

    // Deletion

    /// Resolve the confirm button's label, after which the delete button of
    /// `target` reacts to clicks
    pub async fn prepare_delete(&self, target: Target) -> anyhow::Result<String> {
        let label = self
            .inner
            .backend
            .get_translation(target.confirm_delete_key())
            .await
            .with_context(|| format!("fetching confirm label for deleting {target}"))?;
        let view = DeleteView::new(label.clone());
        self.inner
            .deletes
            .borrow_mut()
            .insert(target.clone(), view.clone());
        self.inner.page.render_delete(&target, &view);
        Ok(label)
    }

    /// Returns whether the confirm button got shown, in which case the next
    /// click elsewhere should be reported through `outside_clicked`
    pub fn delete_clicked(&self, target: &Target) -> bool {
        self.update_delete(target, DeleteView::ask_confirmation)
    }

    /// Returns whether the delete button got shown back
    pub fn outside_clicked(&self, target: &Target) -> bool {
        self.update_delete(target, DeleteView::dismiss)
    }

    /// Returns whether `target` got deleted
    pub async fn confirm_clicked(&self, target: &Target) -> anyhow::Result<bool> {
        if !self.update_delete(target, DeleteView::confirm) {
            return Ok(false);
        }
        let res = match self.form_password() {
            Ok(form_password) => self
                .inner
                .backend
                .delete(target, &form_password)
                .await
                .with_context(|| format!("deleting {target}")),
            Err(e) => Err(e),
        };
        let resp = match res {
            Ok(resp) => resp,
            Err(e) => {
                self.set_delete_phase(target, DeletePhase::Prompt);
                return Err(e);
            }
        };
        match resp.into_result(target.kind()) {
            Ok(()) => {
                tracing::debug!(%target, "deleted");
                self.set_delete_phase(target, DeletePhase::Removed);
                self.inner.page.remove(target);
                Ok(true)
            }
            Err(err) => {
                tracing::info!(%target, %err, "server refused deletion");
                self.set_delete_phase(target, DeletePhase::Prompt);
                self.inner.page.alert(&err.message());
                Ok(false)
            }
        }
    }

    fn update_delete(&self, target: &Target, f: impl FnOnce(&mut DeleteView) -> bool) -> bool {
        let view = {
            let mut deletes = self.inner.deletes.borrow_mut();
            let view = match deletes.get_mut(target) {
                Some(view) => view,
                None => return false,
            };
            if !f(view) {
                return false;
            }
            view.clone()
        };
        self.inner.page.render_delete(target, &view);
        true
    }

    fn set_delete_phase(&self, target: &Target, phase: DeletePhase) {
        self.update_delete(target, |v| {
            v.phase = phase;
            true
        });
    }

    pub fn delete_view(&self, target: &Target) -> Option<DeleteView> {
        self.inner.deletes.borrow().get(target).cloned()
    }

    // Input swaps

    /// Reserve an id for a swap, to be passed to `init_swap` once the page
    /// knows which elements it designates
    pub fn allocate_swap(&self) -> SwapId {
        let id = self.inner.next_swap.get();
        self.inner.next_swap.set(id + 1);
        SwapId(id)
    }

    /// `value` is the value the simple field had when the page loaded
    pub async fn init_swap(
        &self,
        swap: SwapId,
        config: SwapConfig,
        value: String,
    ) -> anyhow::Result<()> {
        let view = SwapView::new(value, config.optional);
        let needs_default = view.showing_default;
        self.inner
            .swaps
            .borrow_mut()
            .insert(swap, (config, view.clone()));
        self.inner.page.render_swap(swap, &view, false);
        if needs_default {
            self.fetch_default_text(swap).await?;
        }
        Ok(())
    }

    pub fn swap_focused(&self, swap: SwapId) {
        if let Some(view) = self.update_swap(swap, SwapView::focus_simple) {
            self.inner.page.render_swap(swap, &view, true);
        }
    }

    pub async fn swap_blurred(&self, swap: SwapId, value: String) -> anyhow::Result<()> {
        if let Some(view) = self.update_swap(swap, |v| v.blur_rich(value)) {
            self.inner.page.render_swap(swap, &view, false);
            self.fetch_default_text(swap).await?;
        }
        Ok(())
    }

    /// Returns whether the form may be submitted with the rich control
    /// holding `value`
    pub fn swap_submitted(&self, swap: SwapId, value: String) -> bool {
        match self.inner.swaps.borrow_mut().get_mut(&swap) {
            Some((_, view)) => view.allows_submit(value),
            None => true,
        }
    }

    async fn fetch_default_text(&self, swap: SwapId) -> anyhow::Result<()> {
        let key = match self.inner.swaps.borrow().get(&swap) {
            Some((config, _)) => config.default_text_key.clone(),
            None => return Ok(()),
        };
        let text = self
            .inner
            .backend
            .get_translation(&key)
            .await
            .with_context(|| format!("fetching default text {key:?}"))?;
        if let Some(view) = self.update_swap(swap, |v| v.default_text_arrived(text)) {
            self.inner.page.render_swap(swap, &view, false);
        }
        Ok(())
    }

    fn update_swap(&self, swap: SwapId, f: impl FnOnce(&mut SwapView) -> bool) -> Option<SwapView> {
        let mut swaps = self.inner.swaps.borrow_mut();
        let (_, view) = swaps.get_mut(&swap)?;
        f(view).then(|| view.clone())
    }

    pub fn swap_view(&self, swap: SwapId) -> Option<SwapView> {
        self.inner.swaps.borrow().get(&swap).map(|(_, v)| v.clone())
    }

    // Comment links

    /// Hide the reply forms of `posts`, to be shown by clicking a comment
    /// link. Does nothing and returns false on pages of a logged-out user.
    pub fn add_comment_links(&self, posts: impl IntoIterator<Item = PostId>) -> bool {
        if !self.inner.page.is_online() {
            return false;
        }
        for post in posts {
            self.update_reply_form(&post, false, |v| v.hidden = true);
        }
        true
    }

    pub fn show_reply_form(&self, post: &PostId) {
        self.update_reply_form(post, true, |v| {
            v.hidden = false;
            v.light = false;
        });
    }

    /// `showing_default` is whether the reply input only holds its default
    /// text
    pub fn reply_input_blurred(&self, post: &PostId, showing_default: bool) {
        if showing_default {
            self.update_reply_form(post, false, |v| v.light = true);
        }
    }

    pub fn reply_input_focused(&self, post: &PostId) {
        self.update_reply_form(post, false, |v| v.light = false);
    }

    fn update_reply_form(&self, post: &PostId, focus: bool, f: impl FnOnce(&mut ReplyFormView)) {
        let view = {
            let mut forms = self.inner.reply_forms.borrow_mut();
            let view = forms.entry(post.clone()).or_default();
            f(view);
            *view
        };
        self.inner.page.render_reply_form(post, &view, focus);
    }

    pub fn reply_form_view(&self, post: &PostId) -> Option<ReplyFormView> {
        self.inner.reply_forms.borrow().get(post).copied()
    }
}
