/// Keyword to category slug, first hit wins.
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("bed", "beds"),
    ("mattress", "mattress"),
    ("sofa", "sofas"),
    ("couch", "sofas"),
    ("sectional", "sofas"),
    ("dining", "dining"),
    ("table", "tables"),
    ("coffee", "tables"),
    ("chair", "chairs"),
    ("arm", "chairs"),
    ("accent", "chairs"),
    ("wardrobe", "wardrobes"),
    ("closet", "wardrobes"),
    ("tv", "tv"),
    ("console", "tv"),
    ("media", "tv"),
    ("nightstand", "nightstands"),
    ("bedside", "nightstands"),
    ("ottoman", "ottoman"),
    ("dresser", "dressing"),
    ("vanity", "dressing"),
    ("chaise", "chaise"),
    ("lounge", "chaise"),
];

pub const UNKNOWN_CATEGORY: &str = "uncategorized";

/// Guesses a category slug from a product name.
pub fn guess_category(name: &str) -> &'static str {
    let lowered = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(UNKNOWN_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_keyword_wins() {
        assert_eq!(guess_category("Velvet Sofa"), "sofas");
        assert_eq!(guess_category("Marble Coffee Table"), "tables");
        assert_eq!(guess_category("Bedside Table"), "beds");
        assert_eq!(guess_category("Floor Lamp"), "uncategorized");
    }
}
