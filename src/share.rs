//! Score sharing
//!
//! Builds an outbound tweet-intent link. Opening it is fire-and-forget.

const INTENT_URL: &str = "https://twitter.com/intent/tweet";
const VIA: &str = "QorGeniusOS";

/// Share message for a score
pub fn share_text(score: u32) -> String {
    format!("I scored {} in Flappy QorGenius! Can you beat it?", score)
}

/// Tweet-intent URL embedding the score and the page it was played on
pub fn share_url(score: u32, page_url: &str) -> String {
    format!(
        "{}?text={}&url={}&via={}",
        INTENT_URL,
        encode_component(&share_text(score)),
        encode_component(page_url),
        VIA
    )
}

/// `encodeURIComponent`
#[cfg(target_arch = "wasm32")]
pub fn encode_component(input: &str) -> String {
    js_sys::encode_uri_component(input).into()
}

/// Characters `encodeURIComponent` leaves alone besides alphanumerics
#[cfg(not(target_arch = "wasm32"))]
const COMPONENT: &percent_encoding::AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Same output as `encodeURIComponent`
#[cfg(not(target_arch = "wasm32"))]
pub fn encode_component(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, COMPONENT).to_string()
}

/// Open the share link in a new tab
#[cfg(target_arch = "wasm32")]
pub fn open_share(score: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let page = window.location().href().unwrap_or_default();
    let url = share_url(score, &page);
    if window.open_with_url_and_target(&url, "_blank").is_err() {
        log::warn!("Share window blocked");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_share(score: u32) {
    log::info!("Share: {}", share_url(score, ""));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("it's!"), "it's!");
        assert_eq!(encode_component("x?y=1&z"), "x%3Fy%3D1%26z");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_share_url_embeds_score() {
        let url = share_url(42, "https://example.com/play");
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?text=I%20scored%2042%20in%20Flappy%20QorGenius!%20Can%20you%20beat%20it%3F&url=https%3A%2F%2Fexample.com%2Fplay&via=QorGeniusOS"
        );
    }
}
