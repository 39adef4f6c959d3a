//! Browser implementation of the dashboard [`Screen`].
//!
//! State lives in a Leptos `RwSignal`, so every update re-renders the
//! components reading it. Alerts use `window.alert`; downloads go through a
//! temporary object URL that is revoked right after the click.

use leadpanel::{AppState, ExportFile, Screen};
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Screen backed by a reactive signal.
#[derive(Clone, Copy)]
pub struct BrowserScreen {
    state: RwSignal<AppState>,
}

impl BrowserScreen {
    pub fn new(state: RwSignal<AppState>) -> Self {
        Self { state }
    }

    /// The signal components subscribe to.
    pub fn state(&self) -> RwSignal<AppState> {
        self.state
    }
}

impl Screen for BrowserScreen {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.state.with_untracked(f)
    }

    fn update(&self, f: impl FnOnce(&mut AppState)) {
        self.state.update(f);
    }

    fn alert(&self, message: &str) {
        if let Err(e) = gloo_utils::window().alert_with_message(message) {
            log::error!("Could not show alert: {:?}", e);
        }
    }

    fn download(&self, file: ExportFile) {
        if let Err(e) = trigger_download(&file) {
            log::error!("❌ Download of {} failed: {:?}", file.name, e);
        }
    }
}

/// Save `file` through a temporary anchor and object URL.
fn trigger_download(file: &ExportFile) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&file.body));
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let href = Url::create_object_url_with_blob(&blob)?;
    let anchor: HtmlAnchorElement = gloo_utils::document()
        .create_element("a")?
        .dyn_into()?;
    anchor.set_href(&href);
    anchor.set_download(&file.name);
    anchor.click();
    Url::revoke_object_url(&href)?;

    log::info!("💾 Offered {} ({} bytes)", file.name, file.body.len());
    Ok(())
}
