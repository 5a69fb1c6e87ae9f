//! Query intent detection: keyword containment, fixed priority order.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Luxury,
    Animal,
    Object,
    Color,
    Text,
    Location,
    Default,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Luxury => "luxury",
            Intent::Animal => "animal",
            Intent::Object => "object",
            Intent::Color => "color",
            Intent::Text => "text",
            Intent::Location => "location",
            Intent::Default => "default",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ANIMAL_KEYWORDS: &[&str] = &["animal", "pet"];
pub const OBJECT_KEYWORDS: &[&str] = &["object", "thing", "what is", "what's in", "show me"];
pub const COLOR_KEYWORDS: &[&str] = &["color", "colour"];
pub const TEXT_KEYWORDS: &[&str] = &["text", "say", "write", "read"];
pub const LOCATION_KEYWORDS: &[&str] = &["where", "location"];

/// Checked top to bottom; the first row with a keyword in the query wins.
pub const QUERY_INTENTS: &[(Intent, &[&str])] = &[
    (Intent::Animal, ANIMAL_KEYWORDS),
    (Intent::Object, OBJECT_KEYWORDS),
    (Intent::Color, COLOR_KEYWORDS),
    (Intent::Text, TEXT_KEYWORDS),
    (Intent::Location, LOCATION_KEYWORDS),
];

/// Classify a query by itself. Never returns [`Intent::Luxury`]; that intent
/// comes from the image, not the question.
pub fn classify_query(query: &str) -> Intent {
    let query = query.to_lowercase();
    QUERY_INTENTS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| query.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Default)
}
