//! Browser session history access.

use wasm_bindgen::JsValue;

use crate::models::HistoryState;
use crate::utils::dom;

/// The subset of the History API navigation needs.
pub trait History {
    /// Current pathname.
    fn path(&self) -> String;

    /// State attached to the current entry (empty when absent or foreign).
    fn state(&self) -> HistoryState;

    fn push(&self, path: &str, state: &HistoryState);

    fn replace(&self, path: &str, state: &HistoryState);
}

/// [`History`] over `window.history` and `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    fn encode(state: &HistoryState) -> JsValue {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        serde::Serialize::serialize(state, &serializer).unwrap_or(JsValue::NULL)
    }

    fn write(&self, path: &str, state: &HistoryState, replace: bool) {
        let Some(history) = dom::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let data = Self::encode(state);
        let result = if replace {
            history.replace_state_with_url(&data, "", Some(path))
        } else {
            history.push_state_with_url(&data, "", Some(path))
        };
        if let Err(e) = result {
            web_sys::console::error_1(&format!("History update to {} failed: {:?}", path, e).into());
        }
    }
}

impl History for BrowserHistory {
    fn path(&self) -> String {
        dom::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn state(&self) -> HistoryState {
        dom::window()
            .and_then(|w| w.history().ok())
            .and_then(|h| h.state().ok())
            .filter(|s| !s.is_null() && !s.is_undefined())
            .and_then(|s| serde_wasm_bindgen::from_value(s).ok())
            .unwrap_or_default()
    }

    fn push(&self, path: &str, state: &HistoryState) {
        self.write(path, state, false);
    }

    fn replace(&self, path: &str, state: &HistoryState) {
        self.write(path, state, true);
    }
}
