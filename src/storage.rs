use vitrina_core::{PreferenceStore, StoreError};
use web_sys::Storage;

use crate::dom;

/// `window.localStorage` behind the preference store interface. Storage can
/// be missing (privacy modes, sandboxed frames); reads then come back empty.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = dom::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            gloo::console::warn!("local storage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        let raw = self.storage.as_ref()?.get_item(key).ok()??;
        if raw.trim().is_empty() {
            return None;
        }
        Some(raw)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Write(dom::js_err(err)))
    }
}
