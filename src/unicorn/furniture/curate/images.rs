//! Image URL filtering and normalisation.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of images a curated product keeps.
pub const MAX_IMAGES: usize = 4;

const MIN_URL_LEN: usize = 10;

static REJECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)_50x50",
        r"(?i)_100x100",
        r"(?i)icon",
        r"(?i)logo",
        r"(?i)banner",
        r"(?i)avatar",
        r"(?i)\.gif$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid image reject regex"))
    .collect()
});

static SIZE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d+x\d+").expect("valid size suffix regex"));

/// Marketplace CDN whose WebP renditions have a JPEG twin.
const ANIMATED_FORMAT_CDN: &str = "alicdn.com";

/// Keeps full-size product shots, in input order, up to [`MAX_IMAGES`].
///
/// Short strings and thumbnails, icons, logos, banners, avatars and GIFs
/// are dropped. Size suffixes such as `_220x220` are stripped, and CDN
/// WebP links are rewritten to JPEG.
pub fn curate<S: AsRef<str>>(images: &[S]) -> Vec<String> {
    images
        .iter()
        .map(|url| AsRef::<str>::as_ref(url))
        .filter(|url| url.len() >= MIN_URL_LEN)
        .filter(|url| !REJECT_PATTERNS.iter().any(|pattern| pattern.is_match(url)))
        .map(|url| {
            let stripped = SIZE_SUFFIX.replace_all(url, "").into_owned();
            if stripped.contains(ANIMATED_FORMAT_CDN) {
                stripped.replace(".webp", ".jpg")
            } else {
                stripped
            }
        })
        .take(MAX_IMAGES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_thumbnails_and_branding() {
        let images = [
            "https://ae01.alicdn.com/kf/S1_50x50.jpg",
            "https://ae01.alicdn.com/kf/shop-LOGO.png",
            "https://cdn.example.com/Banner-top.jpg",
            "https://cdn.example.com/user-avatar.png",
            "https://cdn.example.com/spinner.GIF",
            "https://cdn.example.com/site-icon.png",
            "http://x",
            "https://ae01.alicdn.com/kf/Sgood.jpg",
        ];
        assert_eq!(curate(&images), vec!["https://ae01.alicdn.com/kf/Sgood.jpg"]);
    }

    #[test]
    fn strips_size_suffix_and_converts_cdn_webp() {
        let images = [
            "https://ae01.alicdn.com/kf/Sbed_640x640.jpg_.webp",
            "https://cdn.example.com/sofa_800x600.webp",
        ];
        assert_eq!(
            curate(&images),
            vec![
                "https://ae01.alicdn.com/kf/Sbed.jpg_.jpg",
                "https://cdn.example.com/sofa.webp",
            ]
        );
    }

    #[test]
    fn keeps_first_four_in_order() {
        let images: Vec<String> = (1..=6)
            .map(|i| format!("https://cdn.example.com/p{i}.jpg"))
            .collect();
        let curated = curate(&images);
        assert_eq!(curated.len(), MAX_IMAGES);
        assert_eq!(curated[0], "https://cdn.example.com/p1.jpg");
        assert_eq!(curated[3], "https://cdn.example.com/p4.jpg");
    }
}
