#![forbid(unsafe_code)]

//! The single configuration fetch.

use folio_fx_core::{ConfigError, EffectsConfig};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

fn describe(err: JsValue) -> ConfigError {
    ConfigError::Fetch(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// GET `url` and return the body text of a 2xx response.
pub async fn fetch_config(url: &str) -> Result<String, ConfigError> {
    let window = web_sys::window().ok_or_else(|| ConfigError::Fetch("no window".to_owned()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(describe)?
        .dyn_into::<Response>()
        .map_err(describe)?;
    if !response.ok() {
        return Err(ConfigError::Status(response.status()));
    }
    let body = JsFuture::from(response.text().map_err(describe)?)
        .await
        .map_err(describe)?;
    body.as_string()
        .ok_or_else(|| ConfigError::Fetch("response body is not text".to_owned()))
}

/// Fetch once and fall back to defaults on any failure.
pub async fn load_config(url: &str) -> EffectsConfig {
    tracing::debug!(url, "fetching animation config");
    EffectsConfig::resolve(fetch_config(url).await)
}
