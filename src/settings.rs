use vitrina_core::FxConfig;
use web_sys::Document;

/// Id of an optional `<script type="application/json">` block carrying
/// [`FxConfig`] overrides.
pub const CONFIG_ID: &str = "vitrina-config";

pub fn load_config(document: &Document) -> FxConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return FxConfig::default();
    };
    if raw.trim().is_empty() {
        return FxConfig::default();
    }
    match FxConfig::from_json(&raw) {
        Ok(config) => {
            gloo::console::log!("config: page overrides applied");
            config
        }
        Err(err) => {
            gloo::console::warn!("config: ignoring page overrides", err.to_string());
            FxConfig::default()
        }
    }
}
