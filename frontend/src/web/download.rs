//! Export download trigger.
//!
//! Hands exported bytes to the user as a file: wrap them in a Blob,
//! mint an object URL, click a transient anchor, revoke the URL.

use wasm_bindgen::JsCast;

use crate::api::FileDownload;

pub fn save_file(download: &FileDownload) {
    if trigger(download).is_none() {
        web_sys::console::error_1(&"[Download] Could not start the file download.".into());
    }
}

fn trigger(download: &FileDownload) -> Option<()> {
    let document = web_sys::window()?.document()?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(download.bytes.as_slice()));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&download.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).ok()?;

    let anchor: web_sys::HtmlAnchorElement =
        document.create_element("a").ok()?.dyn_into().ok()?;
    anchor.set_href(&url);
    anchor.set_download(&download.filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Some(())
}
