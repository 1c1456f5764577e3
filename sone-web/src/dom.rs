use std::{cell::RefCell, collections::HashMap, time::Duration};

use anyhow::{anyhow, Context};
use sone_client::{
    api::{FormPassword, PostId, Target},
    DeleteView, LikeView, Page, ReplyFormView, Sleeper, SoneView, StatusView, SwapId, SwapView,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, NodeList};

use crate::WasmSleeper;

const HIDDEN: &str = "hidden";
const REMOVING: &str = "removing";

// Duration of the collapse animation of removed posts and replies
const REMOVAL_DELAY: Duration = Duration::from_millis(400);

/// Turn a javascript exception into an error
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{e:?}")
}

/// Escape `s` for use as a css identifier in a selector
///
/// Sone ids contain characters like `~` that have a meaning in selectors.
pub fn css_ident(s: &str) -> String {
    if s == "-" {
        return String::from("\\-");
    }
    let leading_hyphen = s.starts_with('-');
    let mut res = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '0'..='9' if i == 0 || (i == 1 && leading_hyphen) => {
                res.push_str(&format!("\\{:x} ", c as u32))
            }
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => res.push(c),
            c => res.push_str(&format!("\\{:x} ", c as u32)),
        }
    }
    res
}

fn target_selector(target: &Target) -> String {
    format!("#sone .{}#{}", target.kind(), css_ident(target.id()))
}

/// The rich control replacing a simple input field
#[derive(Clone)]
pub enum RichControl {
    TextArea(HtmlTextAreaElement),
    Input(HtmlInputElement),
}

impl RichControl {
    pub fn element(&self) -> &HtmlElement {
        match self {
            RichControl::TextArea(e) => e,
            RichControl::Input(e) => e,
        }
    }

    pub fn value(&self) -> String {
        match self {
            RichControl::TextArea(e) => e.value(),
            RichControl::Input(e) => e.value(),
        }
    }
}

struct SwapElements {
    simple: HtmlInputElement,
    rich: RichControl,
}

struct DeleteButtons {
    prompt: HtmlElement,
    confirm: HtmlElement,
}

/// The server-rendered Sone page, as seen through the DOM
pub struct PageDom {
    document: Document,
    swaps: RefCell<HashMap<SwapId, SwapElements>>,
    deletes: RefCell<HashMap<Target, DeleteButtons>>,
}

impl PageDom {
    pub fn new(document: Document) -> PageDom {
        PageDom {
            document,
            swaps: RefCell::new(HashMap::new()),
            deletes: RefCell::new(HashMap::new()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Base the ajax endpoints are resolved against
    pub fn base_url(&self) -> anyhow::Result<url::Url> {
        let base = self
            .document
            .base_uri()
            .map_err(js_err)?
            .ok_or_else(|| anyhow!("document has no base uri"))?;
        url::Url::parse(&base).with_context(|| format!("parsing base uri {base:?}"))
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(?err, selector, "invalid selector");
                None
            }
        }
    }

    pub fn query_all<E: JsCast>(&self, selector: &str) -> Vec<E> {
        collect(self.document.query_selector_all(selector), selector)
    }

    /// Every post on the page, along with its element
    pub fn posts(&self) -> Vec<(PostId, Element)> {
        self.query_all::<Element>("#sone .post")
            .into_iter()
            .map(|e| (PostId(e.id()), e))
            .collect()
    }

    /// Create the hidden confirm button, right after the delete button
    pub fn create_confirm_button(
        &self,
        prompt: &HtmlElement,
        label: &str,
    ) -> anyhow::Result<HtmlElement> {
        let confirm: HtmlElement = self
            .document
            .create_element("button")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| anyhow!("created button is not an html element"))?;
        confirm.set_class_name(&format!("{} {HIDDEN}", prompt.class_name()));
        confirm.class_list().add_1("confirm").map_err(js_err)?;
        confirm.set_text_content(Some(label));
        prompt
            .insert_adjacent_element("afterend", &confirm)
            .map_err(js_err)?;
        Ok(confirm)
    }

    pub fn register_delete(&self, target: Target, prompt: HtmlElement, confirm: HtmlElement) {
        self.deletes
            .borrow_mut()
            .insert(target, DeleteButtons { prompt, confirm });
    }

    /// Create the hidden rich control, right after `simple`
    pub fn create_rich_control(
        &self,
        simple: &HtmlInputElement,
        field_name: &str,
        use_textarea: bool,
    ) -> anyhow::Result<RichControl> {
        let rich = match use_textarea {
            true => {
                let e: HtmlTextAreaElement = self
                    .document
                    .create_element("textarea")
                    .map_err(js_err)?
                    .dyn_into()
                    .map_err(|_| anyhow!("created textarea has the wrong type"))?;
                e.set_name(field_name);
                e.set_value(&simple.value());
                RichControl::TextArea(e)
            }
            false => {
                let e: HtmlInputElement = self
                    .document
                    .create_element("input")
                    .map_err(js_err)?
                    .dyn_into()
                    .map_err(|_| anyhow!("created input has the wrong type"))?;
                e.set_type("text");
                e.set_name(field_name);
                e.set_value(&simple.value());
                RichControl::Input(e)
            }
        };
        rich.element().class_list().add_1(HIDDEN).map_err(js_err)?;
        simple
            .insert_adjacent_element("afterend", rich.element())
            .map_err(js_err)?;
        Ok(rich)
    }

    pub fn register_swap(&self, swap: SwapId, simple: HtmlInputElement, rich: RichControl) {
        self.swaps
            .borrow_mut()
            .insert(swap, SwapElements { simple, rich });
    }
}

pub fn query_all_in<E: JsCast>(root: &Element, selector: &str) -> Vec<E> {
    collect(root.query_selector_all(selector), selector)
}

fn collect<E: JsCast>(list: Result<NodeList, JsValue>, selector: &str) -> Vec<E> {
    let list = match list {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!(?err, selector, "invalid selector");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<E>().ok())
        .collect()
}

fn set_class(e: &Element, class: &str, set: bool) {
    if let Err(err) = e.class_list().toggle_with_force(class, set) {
        tracing::warn!(?err, class, "failed toggling class");
    }
}

impl StatusView for PageDom {
    fn render_sone(&self, view: &SoneView) {
        let root = format!("#sone .sone.{}", css_ident(&view.id.0));
        for e in self.query_all::<Element>(&root) {
            for (class, set) in view.class_flags() {
                set_class(&e, class, set);
            }
            for time in query_all_in::<Element>(&e, ".last-update span.time") {
                time.set_text_content(Some(&view.last_updated));
            }
            for link in query_all_in::<Element>(&e, ".profile-link a") {
                link.set_text_content(Some(&view.name));
            }
        }
    }
}

impl Page for PageDom {
    fn form_password(&self) -> Option<FormPassword> {
        self.query("#sone #formPassword")
            .and_then(|e| e.text_content())
            .map(|p| FormPassword(String::from(p.trim())))
    }

    fn is_online(&self) -> bool {
        self.query("#sone.online").is_some()
    }

    fn render_likes(&self, target: &Target, view: &LikeView) {
        let root = match target {
            Target::Post(_) => format!("{} > .status-line", target_selector(target)),
            Target::Reply(_) => format!("{} .status-line", target_selector(target)),
        };
        let toggles = [
            (".like", view.like_hidden()),
            (".unlike", view.unlike_hidden()),
            (".likes", view.likes_hidden()),
        ];
        for (class, hidden) in toggles {
            if let Some(hidden) = hidden {
                for e in self.query_all::<Element>(&format!("{root} {class}")) {
                    set_class(&e, HIDDEN, hidden);
                }
            }
        }
        if let Some(n) = view.likes {
            for e in self.query_all::<Element>(&format!("{root} .likes span.like-count")) {
                e.set_text_content(Some(&n.to_string()));
            }
        }
    }

    fn render_delete(&self, target: &Target, view: &DeleteView) {
        if let Some(b) = self.deletes.borrow().get(target) {
            set_class(&b.prompt, HIDDEN, !view.prompt_visible());
            set_class(&b.confirm, HIDDEN, !view.confirm_visible());
            b.confirm.set_text_content(Some(&view.label));
        }
    }

    fn remove(&self, target: &Target) {
        self.deletes.borrow_mut().remove(target);
        let elements = self.query_all::<Element>(&target_selector(target));
        for e in &elements {
            set_class(e, REMOVING, true);
        }
        // the `removing` class collapses the element, detach it once done
        wasm_bindgen_futures::spawn_local(async move {
            WasmSleeper.sleep(REMOVAL_DELAY).await;
            for e in elements {
                e.remove();
            }
        });
    }

    fn alert(&self, message: &str) {
        let res = self
            .document
            .default_view()
            .map(|w| w.alert_with_message(message));
        if !matches!(res, Some(Ok(()))) {
            tracing::error!(message, "failed showing alert");
        }
    }

    fn render_swap(&self, swap: SwapId, view: &SwapView, focus_rich: bool) {
        let swaps = self.swaps.borrow();
        let Some(SwapElements { simple, rich }) = swaps.get(&swap) else {
            tracing::warn!(?swap, "rendering unregistered swap");
            return;
        };
        set_class(simple, HIDDEN, view.simple_hidden());
        set_class(simple, "default", view.showing_default);
        simple.set_disabled(view.simple_disabled());
        if let Some(value) = view.simple_value() {
            simple.set_value(value);
        }
        set_class(rich.element(), HIDDEN, view.rich_hidden());
        if focus_rich {
            if let Err(err) = rich.element().focus() {
                tracing::warn!(?err, "failed focusing rich control");
            }
        }
    }

    fn render_reply_form(&self, post: &PostId, view: &ReplyFormView, focus_input: bool) {
        let root = format!("#sone .post#{} .create-reply", css_ident(&post.0));
        for form in self.query_all::<Element>(&root) {
            set_class(&form, HIDDEN, view.hidden);
            set_class(&form, "light", view.light);
            if focus_input {
                for input in query_all_in::<HtmlElement>(&form, "input.reply-input") {
                    if let Err(err) = input.focus() {
                        tracing::warn!(?err, "failed focusing reply input");
                    }
                }
            }
        }
    }
}
