use std::{cell::RefCell, rc::Rc};

use anyhow::anyhow;
use sone_client::{
    api::{SoneId, Target},
    Controller, HttpBackend, PollConfig, SwapConfig,
};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Event, HtmlElement, HtmlInputElement};

mod dom;
pub use dom::{css_ident, PageDom, RichControl};

mod events;
use events::{on, spawn_logged, OneShotListener};

mod timer;
pub use timer::WasmSleeper;

type WebController = Controller<HttpBackend, Rc<PageDom>, WasmSleeper>;

#[wasm_bindgen(start)]
pub fn start() {
    tracing_wasm::set_as_global_default();
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

/// Enhancements of the current page, to be created once by page scripts
#[wasm_bindgen]
pub struct SoneUi {
    ctrl: WebController,
}

#[wasm_bindgen]
impl SoneUi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SoneUi, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document to enhance"))?;
        let page = Rc::new(PageDom::new(document));
        let base = page.base_url().map_err(to_js)?;
        tracing::debug!(%base, "enhancing page");
        let ctrl = Controller::new(
            HttpBackend::new(base),
            page,
            WasmSleeper,
            PollConfig::default(),
        );
        Ok(SoneUi { ctrl })
    }

    /// Keep the status of `sone` up to date, once per sone
    #[wasm_bindgen(js_name = watchSone)]
    pub fn watch_sone(&self, sone: String) {
        if let Some(poll) = self.ctrl.watch(SoneId(sone)) {
            wasm_bindgen_futures::spawn_local(poll);
        }
    }

    #[wasm_bindgen(js_name = likePost)]
    pub fn like_post(&self, post: String) {
        self.set_liked(Target::post(post), true)
    }

    #[wasm_bindgen(js_name = unlikePost)]
    pub fn unlike_post(&self, post: String) {
        self.set_liked(Target::post(post), false)
    }

    #[wasm_bindgen(js_name = likeReply)]
    pub fn like_reply(&self, reply: String) {
        self.set_liked(Target::reply(reply), true)
    }

    #[wasm_bindgen(js_name = unlikeReply)]
    pub fn unlike_reply(&self, reply: String) {
        self.set_liked(Target::reply(reply), false)
    }

    /// Make the button matching `selector` ask for confirmation before
    /// deleting `post`
    #[wasm_bindgen(js_name = enhanceDeletePostButton)]
    pub fn enhance_delete_post_button(&self, selector: String, post: String) {
        self.enhance_delete_button(selector, Target::post(post))
    }

    #[wasm_bindgen(js_name = enhanceDeleteReplyButton)]
    pub fn enhance_delete_reply_button(&self, selector: String, reply: String) {
        self.enhance_delete_button(selector, Target::reply(reply))
    }

    /// Replace every input matching `selector` with a richer control once
    /// focused, showing the translation of `default_text_key` while empty
    #[wasm_bindgen(js_name = registerInputTextareaSwap)]
    pub fn register_input_textarea_swap(
        &self,
        selector: String,
        default_text_key: String,
        field_name: String,
        optional: bool,
        dont_use_textarea: bool,
    ) -> Result<(), JsValue> {
        let config = SwapConfig {
            default_text_key,
            field_name,
            optional,
            use_textarea: !dont_use_textarea,
        };
        let page = self.ctrl.page();
        for simple in page.query_all::<HtmlInputElement>(&selector) {
            let swap = self.ctrl.allocate_swap();
            let rich = page
                .create_rich_control(&simple, &config.field_name, config.use_textarea)
                .map_err(to_js)?;
            page.register_swap(swap, simple.clone(), rich.clone());

            on(&simple, "focus", {
                let ctrl = self.ctrl.clone();
                move |_| ctrl.swap_focused(swap)
            })?;
            on(rich.element(), "blur", {
                let ctrl = self.ctrl.clone();
                let rich = rich.clone();
                move |_| {
                    let ctrl = ctrl.clone();
                    let value = rich.value();
                    spawn_logged("showing default text", async move {
                        ctrl.swap_blurred(swap, value).await
                    })
                }
            })?;
            if let Some(form) = simple.form() {
                on(&form, "submit", {
                    let ctrl = self.ctrl.clone();
                    let rich = rich.clone();
                    move |e: Event| {
                        if !ctrl.swap_submitted(swap, rich.value()) {
                            e.prevent_default();
                        }
                    }
                })?;
            }

            let ctrl = self.ctrl.clone();
            let (config, value) = (config.clone(), simple.value());
            spawn_logged("setting up input swap", async move {
                ctrl.init_swap(swap, config, value).await
            });
        }
        Ok(())
    }

    /// Hide the reply forms behind a "Comment" link on every post
    #[wasm_bindgen(js_name = addCommentLinks)]
    pub fn add_comment_links(&self) -> Result<(), JsValue> {
        let page = self.ctrl.page();
        let posts = page.posts();
        if !self
            .ctrl
            .add_comment_links(posts.iter().map(|(id, _)| id.clone()))
        {
            return Ok(());
        }
        for (post, element) in posts {
            let times = dom::query_all_in::<web_sys::Element>(&element, ".status-line .time");
            for time in times {
                let link = page.document().create_element("div")?;
                link.set_class_name("show-reply-form");
                link.set_inner_html("<span>Comment</span>");
                time.insert_adjacent_element("afterend", &link)?;
                on(&link, "click", {
                    let (ctrl, post) = (self.ctrl.clone(), post.clone());
                    move |_| ctrl.show_reply_form(&post)
                })?;
            }
            if let Some(input) = element.query_selector("input.reply-input")? {
                on(&input, "blur", {
                    let (ctrl, post, input) = (self.ctrl.clone(), post.clone(), input.clone());
                    move |_| {
                        let showing_default = input.class_list().contains("default");
                        ctrl.reply_input_blurred(&post, showing_default)
                    }
                })?;
                on(&input, "focus", {
                    let (ctrl, post) = (self.ctrl.clone(), post.clone());
                    move |_| ctrl.reply_input_focused(&post)
                })?;
            }
        }
        Ok(())
    }
}

impl SoneUi {
    fn set_liked(&self, target: Target, liked: bool) {
        let ctrl = self.ctrl.clone();
        spawn_logged("changing like state", async move {
            match liked {
                true => ctrl.like(target).await,
                false => ctrl.unlike(target).await,
            }
        })
    }

    fn enhance_delete_button(&self, selector: String, target: Target) {
        let ctrl = self.ctrl.clone();
        spawn_logged("enhancing delete button", async move {
            let prompt: HtmlElement = ctrl
                .page()
                .query(&selector)
                .ok_or_else(|| anyhow!("no delete button matches {selector:?}"))?
                .dyn_into()
                .map_err(|_| anyhow!("delete button {selector:?} is not an html element"))?;

            // The button only reacts once the confirm label is known
            let label = ctrl.prepare_delete(target.clone()).await?;
            let confirm = ctrl.page().create_confirm_button(&prompt, &label)?;
            ctrl.page()
                .register_delete(target.clone(), prompt.clone(), confirm.clone());
            attach_delete_handlers(ctrl, target, &prompt, &confirm).map_err(dom::js_err)
        })
    }
}

fn attach_delete_handlers(
    ctrl: WebController,
    target: Target,
    prompt: &HtmlElement,
    confirm: &HtmlElement,
) -> Result<(), JsValue> {
    let dismissal: Rc<RefCell<Option<OneShotListener>>> = Rc::new(RefCell::new(None));
    let document = ctrl.page().document().clone();

    on(prompt, "click", {
        let (ctrl, target, dismissal) = (ctrl.clone(), target.clone(), dismissal.clone());
        move |e: Event| {
            e.prevent_default();
            e.stop_propagation();
            if !ctrl.delete_clicked(&target) {
                return;
            }
            let listener = OneShotListener::attach(&document, "click", {
                let (ctrl, target) = (ctrl.clone(), target.clone());
                move |_| {
                    ctrl.outside_clicked(&target);
                }
            });
            match listener {
                Ok(l) => *dismissal.borrow_mut() = Some(l),
                Err(err) => tracing::error!(?err, "failed listening for dismissal"),
            }
        }
    })?;

    on(confirm, "click", move |e: Event| {
        e.prevent_default();
        e.stop_propagation();
        dismissal.borrow_mut().take();
        let (ctrl, target) = (ctrl.clone(), target.clone());
        spawn_logged("deleting", async move {
            ctrl.confirm_clicked(&target).await.map(|_| ())
        })
    })
}
