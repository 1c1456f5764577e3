use std::rc::Rc;

use crate::{
    api::{FormPassword, PostId, Target},
    DeleteView, LikeView, ReplyFormView, SoneView, SwapId, SwapView,
};

/// Where sone statuses get displayed
pub trait StatusView {
    fn render_sone(&self, view: &SoneView);
}

/// The server-rendered page the controller enhances
///
/// Rendering is one-way: implementations project the views onto whatever
/// they display, and never report state back through these methods.
pub trait Page: StatusView {
    /// Anti-forgery token embedded in the page, if any
    fn form_password(&self) -> Option<FormPassword>;

    /// Whether the page is showing the interface of a logged-in sone
    fn is_online(&self) -> bool;

    fn render_likes(&self, target: &Target, view: &LikeView);

    fn render_delete(&self, target: &Target, view: &DeleteView);

    /// Remove the post or reply from the page
    fn remove(&self, target: &Target);

    /// Blocking notification
    fn alert(&self, message: &str);

    fn render_swap(&self, swap: SwapId, view: &SwapView, focus_rich: bool);

    fn render_reply_form(&self, post: &PostId, view: &ReplyFormView, focus_input: bool);
}

impl<V: StatusView + ?Sized> StatusView for Rc<V> {
    fn render_sone(&self, view: &SoneView) {
        (**self).render_sone(view)
    }
}

impl<P: Page + ?Sized> Page for Rc<P> {
    fn form_password(&self) -> Option<FormPassword> {
        (**self).form_password()
    }

    fn is_online(&self) -> bool {
        (**self).is_online()
    }

    fn render_likes(&self, target: &Target, view: &LikeView) {
        (**self).render_likes(target, view)
    }

    fn render_delete(&self, target: &Target, view: &DeleteView) {
        (**self).render_delete(target, view)
    }

    fn remove(&self, target: &Target) {
        (**self).remove(target)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn render_swap(&self, swap: SwapId, view: &SwapView, focus_rich: bool) {
        (**self).render_swap(swap, view, focus_rich)
    }

    fn render_reply_form(&self, post: &PostId, view: &ReplyFormView, focus_input: bool) {
        (**self).render_reply_form(post, view, focus_input)
    }
}
