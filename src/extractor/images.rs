/// Image used when a category has no entry of its own
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1546069901-ba9599a7e63c";

const CATEGORY_IMAGES: &[(&str, &str)] = &[
    ("italian", "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9"),
    ("pasta", "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9"),
    ("asian", "https://images.unsplash.com/photo-1617093727343-374698b1b08d"),
    ("japanese", "https://images.unsplash.com/photo-1617093727343-374698b1b08d"),
    ("chinese", "https://images.unsplash.com/photo-1585032226651-759b368d7246"),
    ("mexican", "https://images.unsplash.com/photo-1565299585323-38d6b0865b47"),
    ("french", "https://images.unsplash.com/photo-1467003909585-2f8a72700288"),
    ("american", "https://images.unsplash.com/photo-1568901346375-23c9450c58cd"),
    ("dessert", "https://images.unsplash.com/photo-1551024506-0bccd828d307"),
    ("breakfast", "https://images.unsplash.com/photo-1533089860892-a7c6f0a88666"),
    ("salad", "https://images.unsplash.com/photo-1512621776951-a57141f2eefd"),
    ("soup", "https://images.unsplash.com/photo-1547592166-23ac45744acd"),
    ("seafood", "https://images.unsplash.com/photo-1559737558-2f5a70f5775c"),
    ("meat", "https://images.unsplash.com/photo-1529692236671-f1f6cf9683ba"),
    ("vegetarian", "https://images.unsplash.com/photo-1512621776951-a57141f2eefd"),
    ("vegan", "https://images.unsplash.com/photo-1512621776951-a57141f2eefd"),
    ("indian", "https://images.unsplash.com/photo-1585937421612-70a008356fbe"),
    ("thai", "https://images.unsplash.com/photo-1562565652-a0d8f0c59eb4"),
    ("mediterranean", "https://images.unsplash.com/photo-1529042410759-befb1204b468"),
];

/// Representative image for a cuisine/category label. Total: unknown labels
/// get `DEFAULT_IMAGE_URL`.
pub fn image_for_category(category: &str) -> &'static str {
    let key = category.trim().to_lowercase();
    CATEGORY_IMAGES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, url)| *url)
        .unwrap_or(DEFAULT_IMAGE_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_case_insensitive() {
        assert_eq!(
            image_for_category("  Italian "),
            "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9"
        );
        assert_eq!(image_for_category("THAI"), image_for_category("thai"));
    }

    #[test]
    fn test_unknown_category_uses_default() {
        assert_eq!(image_for_category("General"), DEFAULT_IMAGE_URL);
        assert_eq!(image_for_category(""), DEFAULT_IMAGE_URL);
        assert_eq!(image_for_category("klingon"), DEFAULT_IMAGE_URL);
    }
}
