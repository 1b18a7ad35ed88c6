//! Browser file dialog.
//!
//! egui cannot open a native file chooser on the web, so a detached
//! `<input type="file">` is clicked programmatically. The chosen file is
//! read into memory and parked in a shared slot until the UI takes it.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use unibot_types::{ClientError, Result, document::SelectedFile};
use crate::http::js_error;

#[derive(Clone, Default)]
pub struct FilePicker {
    picked: Rc<RefCell<Option<SelectedFile>>>,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog. `on_pick` runs after a file has been read.
    pub fn open(&self, accept: &str, on_pick: impl FnOnce() + 'static) -> Result<()> {
        let input: HtmlInputElement = gloo_utils::document()
            .create_element("input")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| ClientError::JsInterop("created element is not an input".to_string()))?;
        input.set_type("file");
        input.set_accept(accept);

        let slot = self.picked.clone();
        let input_for_change = input.clone();
        let onchange = Closure::once(move |_event: web_sys::Event| {
            let Some(file) = input_for_change.files().and_then(|files| files.get(0)) else {
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                match read_file(&file).await {
                    Ok(selected) => {
                        log::debug!("Picked {} ({} bytes)", selected.name, selected.size());
                        *slot.borrow_mut() = Some(selected);
                        on_pick();
                    }
                    Err(e) => log::error!("Failed to read picked file: {}", e),
                }
            });
        });
        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();

        input.click();
        Ok(())
    }

    /// Take the most recently picked file, if any.
    pub fn take(&self) -> Option<SelectedFile> {
        self.picked.borrow_mut().take()
    }
}

async fn read_file(file: &File) -> Result<SelectedFile> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), file.type_(), bytes))
}
