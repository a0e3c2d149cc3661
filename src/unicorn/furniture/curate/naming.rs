//! Brand-style display names built from noisy marketplace titles.

use std::collections::{HashMap, HashSet};

/// Marketing noise removed before keyword detection. Order matters: longer
/// phrases go first so their fragments are not stripped on their own.
const JUNK_PHRASES: &[&str] = &[
    "free shipping",
    "hot sale",
    "new arrival",
    "best seller",
    "factory direct",
    "wholesale",
    "dropshipping",
    "in stock",
    "2024",
    "2025",
    "2026",
    "2027",
    "promotion",
    "special offer",
    "high quality",
    "top quality",
    "brand new",
    "100% new",
    "fast delivery",
    "big sale",
    "flash sale",
    "limited time",
    "for home",
    "for living room",
    "for bedroom",
    "for house",
    "home decoration",
    "home furniture",
    "house furniture",
    "european style",
    "american style",
    "simple modern",
    "hot",
    "new",
    "sale",
    "good quality",
    "premium quality",
];

/// First hit wins.
const MATERIALS: &[(&str, &str)] = &[
    ("velvet", "Velvet"),
    ("bouclé", "Bouclé"),
    ("boucle", "Bouclé"),
    ("leather", "Leather"),
    ("linen", "Linen"),
    ("marble", "Marble"),
    ("sintered", "Sintered Stone"),
    ("travertine", "Travertine"),
    ("glass", "Glass"),
    ("tempered glass", "Glass"),
    ("oak", "Oak"),
    ("walnut", "Walnut"),
    ("teak", "Teak"),
    ("wood", "Wood"),
    ("brass", "Brass"),
    ("gold", "Gold-Accented"),
    ("chrome", "Chrome"),
];

const STYLES: &[(&str, &str)] = &[
    ("modern", "Modern"),
    ("minimalist", "Minimalist"),
    ("nordic", "Nordic"),
    ("italian", "Italian"),
    ("contemporary", "Contemporary"),
    ("mid century", "Mid-Century"),
    ("art deco", "Art Deco"),
    ("curved", "Curved"),
    ("tufted", "Tufted"),
    ("channel", "Channel-Tufted"),
    ("wingback", "Wingback"),
    ("floating", "Floating"),
    ("upholstered", "Upholstered"),
];

const DEFAULT_STYLE: &str = "Modern";

/// Product types, most specific first. A bare `bed` must stay last so that
/// titles mentioning a bedroom or a bedside table resolve to their real type.
const TYPES: &[(&str, &str)] = &[
    ("chaise lounge", "Chaise Longue"),
    ("chaise", "Chaise Longue"),
    ("daybed", "Day Bed"),
    ("platform bed", "Platform Bed"),
    ("storage bed", "Storage Bed"),
    ("bed frame", "Bed"),
    ("l-shape sectional", "L-Shape Sectional"),
    ("l shape", "L-Shape Sectional"),
    ("corner sofa", "Corner Sectional"),
    ("sectional", "Sectional"),
    ("sofa bed", "Sofa Bed"),
    ("sofa", "Sofa"),
    ("couch", "Sofa"),
    ("dining table", "Dining Table"),
    ("dining set", "Dining Collection"),
    ("nightstand", "Nightstand"),
    ("bedside table", "Nightstand"),
    ("bedside", "Nightstand"),
    ("night table", "Nightstand"),
    ("coffee table", "Coffee Table"),
    ("side table", "Side Table"),
    ("console table", "Console Table"),
    ("accent chair", "Accent Chair"),
    ("wingback", "Wingback Chair"),
    ("armchair", "Armchair"),
    ("lounge chair", "Lounge Chair"),
    ("chair", "Chair"),
    ("tv cabinet", "Media Console"),
    ("tv stand", "TV Console"),
    ("tv console", "TV Console"),
    ("media console", "Media Console"),
    ("entertainment", "Entertainment Unit"),
    ("walk in wardrobe", "Walk-In Wardrobe"),
    ("wardrobe", "Wardrobe"),
    ("closet", "Wardrobe System"),
    ("dressing table", "Dressing Table"),
    ("vanity", "Vanity Table"),
    ("chest of drawer", "Chest of Drawers"),
    ("dresser", "Chest of Drawers"),
    ("ottoman", "Ottoman"),
    ("pouf", "Pouf"),
    ("bench", "Bench"),
    ("mattress", "Mattress"),
    ("bookshelf", "Bookshelf"),
    ("shelf", "Shelf Unit"),
    ("bed", "Bed"),
];

const FALLBACK_TYPE: &str = "Furniture";

const COLLECTIONS: &[(&str, [&str; 10])] = &[
    (
        "beds",
        [
            "Milano", "Aurora", "Torino", "Riviera", "Palazzo", "Sienna", "Monaco", "Capri",
            "Verona", "Portofino",
        ],
    ),
    (
        "sofas",
        [
            "Sahara", "Zephyr", "Mayfair", "Belgravia", "Kensington", "Chelsea", "Amalfi", "Como",
            "Positano", "Riviera",
        ],
    ),
    (
        "dining",
        [
            "Carrara", "Firenze", "Tuscany", "Provence", "Vienna", "Geneva", "Nordic", "Lucerne",
            "Basel", "Zurich",
        ],
    ),
    (
        "chairs",
        [
            "Windsor", "Hampton", "Aspen", "Marbella", "Ravello", "Taormina", "Sorrento", "Bergamo",
            "Portofino", "Capri",
        ],
    ),
    (
        "tv",
        [
            "Palazzo", "Gallery", "Studio", "Atelier", "Soho", "Tribeca", "Maison", "Meridian",
            "Moderne", "Chelsea",
        ],
    ),
    (
        "wardrobes",
        [
            "Maison", "Grande", "Regency", "Imperial", "Sovereign", "Regal", "Estate", "Manor",
            "Chateau", "Villa",
        ],
    ),
    (
        "tables",
        [
            "Infinity", "Meridian", "Solstice", "Eclipse", "Zenith", "Apex", "Atlas", "Nova",
            "Summit", "Pinnacle",
        ],
    ),
    (
        "nightstands",
        [
            "Luna", "Stella", "Nova", "Celeste", "Aria", "Lux", "Prima", "Elite", "Serene", "Dusk",
        ],
    ),
    (
        "dressing",
        [
            "Vanity", "Elegance", "Grace", "Belle", "Cherie", "Jolie", "Luxe", "Glam", "Opulent",
            "Bijou",
        ],
    ),
    (
        "ottoman",
        [
            "Florence", "Heritage", "Metro", "Mayfair", "Camden", "Soho", "Knightsbridge",
            "Belgravia", "Kensington", "Chelsea",
        ],
    ),
    (
        "chaise",
        [
            "Riviera", "Amalfi", "Como", "Portofino", "Capri", "Monaco", "Antibes", "Cannes",
            "Sorrento", "Positano",
        ],
    ),
    (
        "mattress",
        [
            "Dreamscape", "Serenity", "Haven", "Cloud", "Elysium", "Plush", "Horizon", "Zenith",
            "Tranquil", "Oasis",
        ],
    ),
];

const HOUSE_COLLECTIONS: &[&str] = &["Unicorn", "Elite", "Prima", "Luxe", "Regal"];

/// Issues display names for one curation run.
///
/// Each category walks its collection pool round-robin, and every issued
/// name is remembered so a run never repeats one. Use a fresh instance (or
/// [`NameTransformer::reset`]) per run.
#[derive(Debug, Default)]
pub struct NameTransformer {
    counters: HashMap<String, usize>,
    used: HashSet<String>,
}

impl NameTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the collection positions and issued names.
    pub fn reset(&mut self) {
        self.counters.clear();
        self.used.clear();
    }

    /// Number of names issued since the last reset.
    pub fn issued(&self) -> usize {
        self.used.len()
    }

    /// Builds `Collection [Material] [Style] Type` for a raw title.
    pub fn transform(&mut self, raw_name: &str, category: &str) -> String {
        let cleaned = strip_junk(raw_name);

        let material = first_label(&cleaned, MATERIALS);
        let style = first_label(&cleaned, STYLES).unwrap_or(DEFAULT_STYLE);
        let product_type = first_label(&cleaned, TYPES)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_type(category));

        let category_key = category.trim().to_lowercase();
        let pool = collection_pool(&category_key);
        let index = self.counters.get(&category_key).copied().unwrap_or(0);
        let collection = pool[index % pool.len()];
        self.counters.insert(category_key.clone(), index + 1);

        let mut name = assemble(collection, material, style, &product_type);

        if self.used.contains(&name) {
            let alternate = pool[(index + 1) % pool.len()];
            name = assemble(alternate, material, style, &product_type);
            self.counters.insert(category_key, index + 2);
        }

        if self.used.contains(&name) {
            name = self.with_free_suffix(&name);
        }

        self.used.insert(name.clone());
        name
    }

    fn with_free_suffix(&self, name: &str) -> String {
        (2..)
            .map(|suffix| format!("{name} {suffix}"))
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

fn assemble(collection: &str, material: Option<&str>, style: &str, product_type: &str) -> String {
    let mut parts = vec![collection];
    if let Some(material) = material {
        parts.push(material);
    }
    if style != DEFAULT_STYLE || material.is_none() {
        parts.push(style);
    }
    parts.push(product_type);
    parts.join(" ")
}

/// Lowercases the title, drops marketing phrases, and collapses whitespace.
fn strip_junk(raw_name: &str) -> String {
    let mut lowered = raw_name.to_lowercase();
    for junk in JUNK_PHRASES {
        lowered = lowered.replace(junk, " ");
    }
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_label(text: &str, table: &[(&str, &'static str)]) -> Option<&'static str> {
    table
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, label)| *label)
}

fn collection_pool(category: &str) -> &'static [&'static str] {
    COLLECTIONS
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, pool)| pool.as_slice())
        .unwrap_or(HOUSE_COLLECTIONS)
}

fn fallback_type(category: &str) -> String {
    if category.trim().is_empty() {
        FALLBACK_TYPE.to_string()
    } else {
        title_case(&category.replace('-', " "))
    }
}

/// Capitalises the first letter of each word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
