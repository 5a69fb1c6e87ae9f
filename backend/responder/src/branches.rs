//! Answer templates, one rule table per intent.
//!
//! Each table is evaluated first-match-wins and ends with a catch-all, so a
//! branch always renders something.

use crate::rules::{always, Rule, Turn};

// ---------------------------------------------------------------------------
// Fixed sentences
// ---------------------------------------------------------------------------

pub const CAT_ANSWER: &str = "The image shows a cat. Cats are domestic felines known for their independent nature and grooming habits. They are popular pets worldwide.";
pub const DOG_ANSWER: &str = "The image shows a dog. Dogs are loyal domestic companions known for their friendly and playful nature. They are among the most popular pets in the world.";
pub const PERSON_ANSWER: &str = "The image shows a person. I can make out human features, but I can't tell who it is.";
pub const CAR_ANSWER: &str = "The image shows a car. It appears to be a passenger vehicle photographed on or near a road.";
pub const NO_OBJECTS_ANSWER: &str = "I don't see any identifiable objects in this image.";
pub const NO_TEXT_ANSWER: &str = "I don't see any readable text in this image.";

// ---------------------------------------------------------------------------
// Keyword sets
// ---------------------------------------------------------------------------

/// Closed set of luxury items; an entity must equal one of these exactly.
pub const LUXURY_KEYWORDS: &[&str] = &[
    "watch",
    "analog watch",
    "wrist watch",
    "jewelry",
    "jewellery",
    "necklace",
    "bracelet",
    "earrings",
    "ring",
    "diamond",
    "gemstone",
    "rolex",
    "omega",
    "patek philippe",
    "audemars piguet",
    "cartier",
    "tiffany & co.",
    "louis vuitton",
    "gucci",
    "prada",
    "chanel",
    "hermès",
    "dior",
    "versace",
    "balenciaga",
    "christian louboutin",
    "nike",
    "air jordan",
    "yeezy",
];

/// Substrings that make a main label luxury-themed on their own.
pub const LUXURY_LABEL_HINTS: &[&str] = &["watch", "jewelry", "fashion"];
pub const WATCH_NAMES: &[&str] = &["watch", "analog watch"];

pub const WILDLIFE_KEYWORDS: &[&str] = &[
    "animal", "wildlife", "fauna", "bird", "mammal", "fish", "reptile", "insect", "horse", "lion",
    "tiger", "bear", "elephant", "deer",
];
pub const COLOR_WORDS: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "purple", "violet", "pink", "brown", "black",
    "white", "gray", "grey", "gold", "silver", "beige",
];
pub const LOCATION_KEYWORDS: &[&str] = &[
    "sky", "mountain", "beach", "city", "building", "landscape", "forest", "ocean", "sea", "lake",
    "river", "street", "park", "landmark", "desert", "field", "nature",
];
pub const NATURE_KEYWORDS: &[&str] = &[
    "landscape", "nature", "mountain", "sky", "beach", "forest", "ocean", "sea", "lake", "tree",
    "cloud", "field", "sunset",
];

const MAX_LISTED: usize = 5;
const SUBSTANTIAL_TEXT_CHARS: usize = 10;

// ---------------------------------------------------------------------------
// Luxury
// ---------------------------------------------------------------------------

/// Entities that are luxury items, in entity order.
pub fn luxury_matches(turn: &Turn) -> Vec<&str> {
    turn.scene
        .entities
        .iter()
        .filter(|e| LUXURY_KEYWORDS.contains(&e.as_str()))
        .map(String::as_str)
        .collect()
}

/// A watch among any label or object, not just the main ones.
pub fn has_watch(turn: &Turn) -> bool {
    turn.scene
        .labels
        .iter()
        .chain(turn.scene.main_objects.iter())
        .any(|e| WATCH_NAMES.contains(&e.as_str()))
}

pub fn is_luxury(turn: &Turn) -> bool {
    !luxury_matches(turn).is_empty()
        || !turn.scene.main_labels_matching(LUXURY_LABEL_HINTS).is_empty()
        || has_watch(turn)
}

fn watch_answer(turn: &Turn) -> String {
    let traits: Vec<&str> = turn
        .scene
        .labels
        .iter()
        .filter(|l| !WATCH_NAMES.contains(&l.as_str()))
        .take(MAX_LISTED)
        .map(String::as_str)
        .collect();
    let mut answer = String::from("This image shows a luxury timepiece.");
    if !traits.is_empty() {
        answer.push_str(&format!(
            " The watch displays characteristics such as {}.",
            traits.join(", ")
        ));
    }
    answer.push_str(
        " Fine watches like this are valued for their craftsmanship, precision, \
         and lasting appeal as collectibles.",
    );
    answer
}

fn luxury_item_answer(turn: &Turn) -> String {
    let matches = luxury_matches(turn);
    let mut answer = if matches.is_empty() {
        String::from("This image appears to show a luxury collectible item.")
    } else {
        format!(
            "This image appears to show a luxury collectible item ({}).",
            matches.join(", ")
        )
    };
    let top = turn.scene.top_labels(3);
    if !top.is_empty() {
        answer.push_str(&format!(" Notable features include {}.", top.join(", ")));
    }
    answer.push_str(" Items like this are often sought after by collectors and enthusiasts.");
    answer
}

pub const LUXURY_RULES: &[Rule] = &[
    Rule { name: "luxury.watch", applies: has_watch, respond: watch_answer },
    Rule { name: "luxury.item", applies: always, respond: luxury_item_answer },
];

// ---------------------------------------------------------------------------
// Animal
// ---------------------------------------------------------------------------

fn shows_cat(turn: &Turn) -> bool {
    turn.scene.mentions(&["cat"])
}

fn shows_dog(turn: &Turn) -> bool {
    turn.scene.mentions(&["dog"])
}

fn shows_wildlife(turn: &Turn) -> bool {
    !turn.scene.main_labels_matching(WILDLIFE_KEYWORDS).is_empty()
}

fn cat_answer(_: &Turn) -> String {
    CAT_ANSWER.to_string()
}

fn dog_answer(_: &Turn) -> String {
    DOG_ANSWER.to_string()
}

fn wildlife_answer(turn: &Turn) -> String {
    let label = turn
        .scene
        .main_labels_matching(WILDLIFE_KEYWORDS)
        .first()
        .copied()
        .unwrap_or("animal");
    format!(
        "The image appears to show a {label}. \
         It looks like an animal, but I can't identify the exact species."
    )
}

fn no_animal_answer(turn: &Turn) -> String {
    match turn.scene.top_label() {
        Some(label) => {
            format!("I don't see any animals in this image. It appears to show {label}.")
        }
        None => "I don't see any animals in this image.".to_string(),
    }
}

pub const ANIMAL_RULES: &[Rule] = &[
    Rule { name: "animal.cat", applies: shows_cat, respond: cat_answer },
    Rule { name: "animal.dog", applies: shows_dog, respond: dog_answer },
    Rule { name: "animal.wildlife", applies: shows_wildlife, respond: wildlife_answer },
    Rule { name: "animal.none", applies: always, respond: no_animal_answer },
];

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

fn has_objects(turn: &Turn) -> bool {
    !turn.scene.main_objects.is_empty()
}

fn has_labels(turn: &Turn) -> bool {
    !turn.scene.main_labels.is_empty()
}

fn objects_answer(turn: &Turn) -> String {
    let mut objects: Vec<&str> = Vec::new();
    for o in &turn.scene.main_objects {
        if objects.len() == MAX_LISTED {
            break;
        }
        if !objects.contains(&o.as_str()) {
            objects.push(o);
        }
    }
    let mut answer = format!(
        "I can identify the following objects in the image: {}.",
        objects.join(", ")
    );
    let top = turn.scene.top_labels(3);
    if !top.is_empty() {
        answer.push_str(&format!(" The overall scene includes {}.", top.join(", ")));
    }
    answer
}

fn labels_only_answer(turn: &Turn) -> String {
    format!(
        "I couldn't isolate individual objects, but the image appears to contain {}.",
        turn.scene.top_labels(3).join(", ")
    )
}

fn no_objects_answer(_: &Turn) -> String {
    NO_OBJECTS_ANSWER.to_string()
}

pub const OBJECT_RULES: &[Rule] = &[
    Rule { name: "object.objects", applies: has_objects, respond: objects_answer },
    Rule { name: "object.labels", applies: has_labels, respond: labels_only_answer },
    Rule { name: "object.none", applies: always, respond: no_objects_answer },
];

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

fn names_colors(turn: &Turn) -> bool {
    !turn.scene.main_labels_matching(COLOR_WORDS).is_empty()
}

fn colors_answer(turn: &Turn) -> String {
    format!(
        "The image features these colors: {}.",
        turn.scene.main_labels_matching(COLOR_WORDS).join(", ")
    )
}

fn no_colors_answer(turn: &Turn) -> String {
    match turn.scene.top_label() {
        Some(label) => format!(
            "I can't pick out specific colors from the analysis, but the image shows {label}."
        ),
        None => "I can't determine the colors in this image.".to_string(),
    }
}

pub const COLOR_RULES: &[Rule] = &[
    Rule { name: "color.named", applies: names_colors, respond: colors_answer },
    Rule { name: "color.unknown", applies: always, respond: no_colors_answer },
];

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn has_text(turn: &Turn) -> bool {
    !turn.scene.text.is_empty()
}

fn text_answer(turn: &Turn) -> String {
    format!("The text in the image reads: \"{}\"", turn.scene.text)
}

fn no_text_answer(_: &Turn) -> String {
    NO_TEXT_ANSWER.to_string()
}

pub const TEXT_RULES: &[Rule] = &[
    Rule { name: "text.found", applies: has_text, respond: text_answer },
    Rule { name: "text.none", applies: always, respond: no_text_answer },
];

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

fn names_place(turn: &Turn) -> bool {
    !turn.scene.main_labels_matching(LOCATION_KEYWORDS).is_empty()
}

fn place_answer(turn: &Turn) -> String {
    format!(
        "This appears to be a location featuring {}.",
        turn.scene.main_labels_matching(LOCATION_KEYWORDS).join(", ")
    )
}

fn unknown_place_answer(turn: &Turn) -> String {
    let top = turn.scene.top_labels(3);
    if top.is_empty() {
        "I can't determine the location from this image.".to_string()
    } else {
        format!(
            "I can't determine the exact location, but the image shows {}.",
            top.join(", ")
        )
    }
}

pub const LOCATION_RULES: &[Rule] = &[
    Rule { name: "location.named", applies: names_place, respond: place_answer },
    Rule { name: "location.unknown", applies: always, respond: unknown_place_answer },
];

// ---------------------------------------------------------------------------
// Default
// ---------------------------------------------------------------------------

fn luxury_answer(turn: &Turn) -> String {
    crate::rules::first_match(LUXURY_RULES, turn)
        .map(|f| f.text)
        .unwrap_or_default()
}

fn shows_person(turn: &Turn) -> bool {
    turn.scene.mentions(&["person"])
}

fn shows_food(turn: &Turn) -> bool {
    turn.scene.mentions(&["food"])
}

fn shows_car(turn: &Turn) -> bool {
    turn.scene.mentions(&["car"])
}

fn person_answer(_: &Turn) -> String {
    PERSON_ANSWER.to_string()
}

fn food_answer(turn: &Turn) -> String {
    let top = turn.scene.top_labels(3);
    if top.is_empty() {
        "The image shows food.".to_string()
    } else {
        format!("The image shows food. It appears to include {}.", top.join(", "))
    }
}

fn car_answer(_: &Turn) -> String {
    CAR_ANSWER.to_string()
}

/// Measured on the text as received, so line breaks count.
fn has_substantial_text(turn: &Turn) -> bool {
    turn.scene.raw_text_chars > SUBSTANTIAL_TEXT_CHARS
}

fn substantial_text_answer(turn: &Turn) -> String {
    format!("The image contains text that reads: \"{}\"", turn.scene.text)
}

fn shows_nature(turn: &Turn) -> bool {
    !turn.scene.main_labels_matching(NATURE_KEYWORDS).is_empty()
}

fn nature_answer(turn: &Turn) -> String {
    format!(
        "This image shows a natural landscape featuring {}.",
        turn.scene.main_labels_matching(NATURE_KEYWORDS).join(", ")
    )
}

fn has_anything(turn: &Turn) -> bool {
    !turn.scene.is_empty()
}

fn summary_answer(turn: &Turn) -> String {
    let items = turn.scene.summary_items(MAX_LISTED);
    let text = &turn.scene.text;
    match (items.is_empty(), text.is_empty()) {
        (false, true) => format!("The image contains {}.", items.join(", ")),
        (false, false) => format!(
            "The image contains {}. It also includes the text: \"{}\".",
            items.join(", "),
            text
        ),
        _ => format!("The image contains the text: \"{text}\"."),
    }
}

pub const DEFAULT_RULES: &[Rule] = &[
    Rule { name: "default.luxury", applies: is_luxury, respond: luxury_answer },
    Rule { name: "default.cat", applies: shows_cat, respond: cat_answer },
    Rule { name: "default.dog", applies: shows_dog, respond: dog_answer },
    Rule { name: "default.person", applies: shows_person, respond: person_answer },
    Rule { name: "default.food", applies: shows_food, respond: food_answer },
    Rule { name: "default.car", applies: shows_car, respond: car_answer },
    Rule { name: "default.text", applies: has_substantial_text, respond: substantial_text_answer },
    Rule { name: "default.nature", applies: shows_nature, respond: nature_answer },
    Rule { name: "default.summary", applies: has_anything, respond: summary_answer },
    Rule { name: "default.empty", applies: always, respond: no_objects_answer },
];
