use reqwest::Url;

/// Canonicalize a video URL into the key recipes are cached under.
///
/// Query string and fragment are dropped so tracking-parameter variants of
/// one video share a key. Input that does not parse as a URL is returned
/// trimmed and otherwise untouched.
pub fn normalize_url(raw_url: &str) -> String {
    let trimmed = raw_url.trim();
    match Url::parse(trimmed) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => trimmed.to_string(),
    }
}
