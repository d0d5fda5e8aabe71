//! Asset loading
//!
//! The sprite image is fetched asynchronously. Until it is ready (or if it
//! never loads) the renderer falls back to a placeholder rectangle.

/// Load state of an external asset
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssetState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed,
}

impl<T> AssetState<T> {
    /// The asset, if it finished loading
    pub fn ready(&self) -> Option<&T> {
        match self {
            AssetState::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    /// Record a load outcome
    pub fn resolve<E: std::fmt::Debug>(result: Result<T, E>, name: &str) -> Self {
        match result {
            Ok(asset) => {
                log::info!("Loaded {}", name);
                AssetState::Ready(asset)
            }
            Err(e) => {
                log::warn!("Failed to load {} ({:?}) - using placeholder", name, e);
                AssetState::Failed
            }
        }
    }
}

/// Fetch an image and wait for it to decode
#[cfg(target_arch = "wasm32")]
pub async fn load_image(src: &str) -> Result<web_sys::HtmlImageElement, wasm_bindgen::JsValue> {
    let image = web_sys::HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    wasm_bindgen_futures::JsFuture::from(loaded).await?;

    image.set_onload(None);
    image.set_onerror(None);
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let ok: AssetState<u32> = AssetState::resolve(Ok::<_, ()>(7), "logo");
        assert_eq!(ok.ready(), Some(&7));

        let failed: AssetState<u32> = AssetState::resolve(Err("404"), "logo");
        assert_eq!(failed, AssetState::Failed);
        assert_eq!(failed.ready(), None);

        let loading: AssetState<u32> = AssetState::default();
        assert_eq!(loading, AssetState::Loading);
    }
}
