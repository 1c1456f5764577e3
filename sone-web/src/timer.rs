use std::time::Duration;

use async_trait::async_trait;
use sone_client::Sleeper;

pub struct WasmSleeper;

#[async_trait(?Send)]
impl Sleeper for WasmSleeper {
    async fn sleep(&self, d: Duration) {
        if let Err(err) = wasm_timer::Delay::new(d).await {
            tracing::error!(?err, "failed sleeping");
        }
    }
}
