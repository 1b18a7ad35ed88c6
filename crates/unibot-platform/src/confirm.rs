//! Native `window.confirm()` dialog.

use unibot_core::ports::ConfirmPort;

pub struct BrowserConfirm;

impl ConfirmPort for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        gloo_utils::window()
            .confirm_with_message(prompt)
            .unwrap_or_else(|e| {
                log::warn!("confirm() unavailable: {:?}", e);
                false
            })
    }
}
