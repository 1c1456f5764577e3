use std::future::Future;

use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// Listen to `event` on `target` for the lifetime of the page
pub fn on(
    target: &EventTarget,
    event: &str,
    f: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Listener that fires at most once, and is detached when dropped
pub struct OneShotListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl OneShotListener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        f: impl FnOnce(Event) + 'static,
    ) -> Result<OneShotListener, JsValue> {
        let mut f = Some(f);
        let closure = Closure::wrap(Box::new(move |e: Event| {
            if let Some(f) = f.take() {
                f(e)
            }
        }) as Box<dyn FnMut(Event)>);
        let mut options = AddEventListenerOptions::new();
        options.once(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(OneShotListener {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for OneShotListener {
    fn drop(&mut self) {
        // no-op if the browser already removed it after firing
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Run `fut` in the background, logging its failure
pub fn spawn_logged(what: &'static str, fut: impl Future<Output = anyhow::Result<()>> + 'static) {
    spawn_local(async move {
        if let Err(err) = fut.await {
            tracing::error!(?err, "{what} failed");
        }
    })
}
