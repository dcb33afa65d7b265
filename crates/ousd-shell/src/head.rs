//! Applies [`HeadMetadata`] to the window or the host document.

use eframe::egui;
use ousd_shell_core::HeadMetadata;

#[cfg(not(target_arch = "wasm32"))]
pub fn apply(ctx: &egui::Context, head: &HeadMetadata) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Title(head.title.to_owned()));
}

#[cfg(target_arch = "wasm32")]
pub fn apply(_ctx: &egui::Context, head: &HeadMetadata) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    document.set_title(head.title);
    let results = [
        upsert_meta(&document, "name", "viewport", head.viewport),
        upsert_meta(&document, "property", "og:image", head.og_image),
        upsert_meta(&document, "name", "twitter:image", head.twitter_image),
    ];
    for result in results {
        if let Err(e) = result {
            tracing::warn!(error = ?e, "failed to update head metadata");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn upsert_meta(
    document: &web_sys::Document,
    attr: &str,
    key: &str,
    content: &str,
) -> Result<(), wasm_bindgen::JsValue> {
    let selector = format!("meta[{attr}=\"{key}\"]");
    let element = match document.query_selector(&selector)? {
        Some(element) => element,
        None => {
            let element = document.create_element("meta")?;
            element.set_attribute(attr, key)?;
            if let Some(head) = document.head() {
                head.append_child(&element)?;
            }
            element
        }
    };
    element.set_attribute("content", content)
}
