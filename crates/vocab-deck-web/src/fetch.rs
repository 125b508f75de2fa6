use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use vocab_deck::{CatalogError, CatalogSource};

/// Fetches the catalog document over HTTP, bypassing the HTTP cache.
pub struct FetchSource {
    url: String,
}

impl FetchSource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

fn unavailable(e: JsValue) -> CatalogError {
    CatalogError::Unavailable(format!("{e:?}"))
}

impl CatalogSource for FetchSource {
    async fn fetch_text(&self) -> Result<String, CatalogError> {
        let window =
            web_sys::window().ok_or_else(|| CatalogError::Unavailable("no window".to_string()))?;

        let init = RequestInit::new();
        init.set_cache(RequestCache::NoStore);
        let request = Request::new_with_str_and_init(&self.url, &init).map_err(unavailable)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(unavailable)?
            .dyn_into()
            .map_err(unavailable)?;
        if !response.ok() {
            return Err(CatalogError::Status(response.status()));
        }

        let body = JsFuture::from(response.text().map_err(unavailable)?)
            .await
            .map_err(unavailable)?;
        body.as_string()
            .ok_or_else(|| CatalogError::Unavailable(format!("{}: body is not text", self.url)))
    }
}
