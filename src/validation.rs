/// Social platform a video URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    TikTok,
    Instagram,
}

/// Check that a URL points at a supported video platform.
///
/// Matching is by substring, so short links such as `vm.tiktok.com` pass too.
pub fn validate_video_url(url: &str) -> Result<Platform, String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("Please paste a video URL".to_string());
    }

    if trimmed.contains("tiktok.com") {
        return Ok(Platform::TikTok);
    }

    if trimmed.contains("instagram.com/reel") || trimmed.contains("instagram.com/p/") {
        return Ok(Platform::Instagram);
    }

    Err("Please use a TikTok or Instagram URL".to_string())
}
