//! Templated product copy keyed by category and material.

use sha2::{Digest, Sha256};

const TEMPLATES: &[(&str, &[&str])] = &[
    (
        "beds",
        &[
            "Crafted for restful luxury. The {name} features {mat}, combining lasting comfort with refined aesthetics — the centrepiece your bedroom deserves.",
            "Where comfort meets contemporary design. The {name} brings {mat} together with clean architectural lines, creating a sanctuary of calm in your master suite.",
            "Engineered for both beauty and function. The {name} offers {mat} with thoughtful proportions — built to transform your bedroom into a five-star retreat.",
        ],
    ),
    (
        "sofas",
        &[
            "Designed for the way you actually live. The {name} delivers {mat} with deep, generous seating — perfect for family evenings and elegant entertaining alike.",
            "Sink into the {name}. {mat} meets precision tailoring in a silhouette that anchors any living space with effortless sophistication.",
            "The {name} redefines comfort. {mat} and a design that adapts to your space, your lifestyle, and your vision for home.",
        ],
    ),
    (
        "dining",
        &[
            "Gather around the {name} — where {mat} creates the backdrop for memorable meals and meaningful conversations in your Dubai home.",
            "The {name} brings {mat} to your dining space. Designed to seat your family in comfort and your guests in style.",
        ],
    ),
    (
        "chairs",
        &[
            "A statement piece that earns its place. The {name} features {mat} — the kind of chair that guests notice and remember.",
            "The {name} brings personality to any corner. {mat} with expert proportions that balance comfort with visual impact.",
        ],
    ),
    (
        "tv",
        &[
            "Clean lines. Hidden cables. The {name} brings {mat} to your entertainment space — designed to complement your screen, not compete with it.",
            "The {name} combines {mat} with intelligent cable management. Your living room's most refined anchor piece.",
        ],
    ),
    (
        "wardrobes",
        &[
            "Your wardrobe, elevated. The {name} offers {mat} with thoughtful organisation — because getting dressed should feel effortless every morning.",
        ],
    ),
    (
        "tables",
        &[
            "The {name} — {mat} in a form that draws the eye. A table that invites conversation and completes your living space.",
        ],
    ),
    (
        "nightstands",
        &[
            "The {name} — {mat} within arm's reach. Compact, considered, and perfectly proportioned for your bedside essentials.",
        ],
    ),
    (
        "chaise",
        &[
            "The {name} — where afternoon reading becomes a ritual. {mat} sculpted into a silhouette that invites you to slow down.",
        ],
    ),
];

const GENERIC_TEMPLATES: &[&str] =
    &["The {name} — {mat}. Designed for homes that demand more."];

/// First keyword found in the raw title selects the material phrase.
const MATERIAL_PHRASES: &[(&str, &str)] = &[
    ("velvet", "sumptuous velvet upholstery"),
    ("bouclé", "textured bouclé fabric"),
    ("boucle", "textured bouclé fabric"),
    ("leather", "premium genuine leather"),
    ("linen", "breathable natural linen"),
    ("marble", "natural marble surfaces"),
    ("sintered", "Italian sintered stone"),
    ("glass", "tempered glass and polished metal"),
    ("oak", "natural European oak"),
    ("walnut", "rich American walnut"),
    ("teak", "sustainably sourced teak"),
    ("wood", "solid hardwood construction"),
    ("brass", "brushed brass accents"),
    ("gold", "gold-finished detailing"),
    ("chrome", "polished chrome hardware"),
    ("upholstered", "premium performance fabric"),
];

const DEFAULT_MATERIAL_PHRASE: &str = "premium materials and expert craftsmanship";

/// Writes the product paragraph for a curated name.
///
/// The template is chosen by [`template_index`], so the same display name
/// and category always produce the same text.
pub fn generate(display_name: &str, raw_name: &str, category: &str) -> String {
    let raw_lower = raw_name.to_lowercase();
    let material = MATERIAL_PHRASES
        .iter()
        .find(|(keyword, _)| raw_lower.contains(keyword))
        .map(|(_, phrase)| *phrase)
        .unwrap_or(DEFAULT_MATERIAL_PHRASE);

    let category = category.to_lowercase();
    let templates = TEMPLATES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, templates)| *templates)
        .unwrap_or(GENERIC_TEMPLATES);

    let template = templates[template_index(display_name, templates.len())];
    template
        .replace("{name}", display_name)
        .replace("{mat}", material)
}

/// Stable template slot: the leading eight bytes of the SHA-256 digest of
/// the display name, read big-endian, modulo `count`.
pub fn template_index(display_name: &str, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let digest = Sha256::digest(display_name.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % count as u64) as usize
}
