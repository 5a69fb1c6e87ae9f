//! Entry point: analysis + query → canned answer.

use tracing::debug;

use oravision_core::{AnalysisResult, SynthesizedAnswer};

use crate::branches::{
    is_luxury, ANIMAL_RULES, COLOR_RULES, DEFAULT_RULES, LOCATION_RULES, LUXURY_RULES, OBJECT_RULES,
    TEXT_RULES,
};
use crate::intent::{
    Intent, ANIMAL_KEYWORDS, COLOR_KEYWORDS, LOCATION_KEYWORDS, OBJECT_KEYWORDS, TEXT_KEYWORDS,
};
use crate::rules::{always, first_match, Rule, Turn};
use crate::scene::Scene;

/// One row of the top-level routing table.
struct Route {
    intent: Intent,
    applies: fn(&Turn) -> bool,
    rules: &'static [Rule],
}

fn asks_about_animals(turn: &Turn) -> bool {
    turn.query_mentions(ANIMAL_KEYWORDS)
}

fn asks_about_objects(turn: &Turn) -> bool {
    turn.query_mentions(OBJECT_KEYWORDS)
}

fn asks_about_colors(turn: &Turn) -> bool {
    turn.query_mentions(COLOR_KEYWORDS)
}

fn asks_about_text(turn: &Turn) -> bool {
    turn.query_mentions(TEXT_KEYWORDS)
}

fn asks_about_location(turn: &Turn) -> bool {
    turn.query_mentions(LOCATION_KEYWORDS)
}

/// Luxury items in the image outrank anything the query asks for.
const ROUTES: &[Route] = &[
    Route { intent: Intent::Luxury, applies: is_luxury, rules: LUXURY_RULES },
    Route { intent: Intent::Animal, applies: asks_about_animals, rules: ANIMAL_RULES },
    Route { intent: Intent::Object, applies: asks_about_objects, rules: OBJECT_RULES },
    Route { intent: Intent::Color, applies: asks_about_colors, rules: COLOR_RULES },
    Route { intent: Intent::Text, applies: asks_about_text, rules: TEXT_RULES },
    Route { intent: Intent::Location, applies: asks_about_location, rules: LOCATION_RULES },
    Route { intent: Intent::Default, applies: always, rules: DEFAULT_RULES },
];

/// A completion together with the route and rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub intent: Intent,
    pub rule: &'static str,
    pub completion: String,
}

/// Run the decision table and report which rule fired.
pub fn explain(analysis: &AnalysisResult, query: &str) -> Synthesis {
    let turn = Turn::new(Scene::from_analysis(analysis), query);

    for route in ROUTES {
        if !(route.applies)(&turn) {
            continue;
        }
        if let Some(fired) = first_match(route.rules, &turn) {
            debug!(intent = %route.intent, rule = fired.rule, "Synthesized answer");
            return Synthesis {
                intent: route.intent,
                rule: fired.rule,
                completion: fired.text,
            };
        }
    }

    // Every branch table ends in a catch-all and the last route always applies.
    Synthesis {
        intent: Intent::Default,
        rule: "default.empty",
        completion: crate::branches::NO_OBJECTS_ANSWER.to_string(),
    }
}

/// Answer `query` about `analysis`. Deterministic; never mutates its input.
pub fn synthesize(analysis: &AnalysisResult, query: &str) -> SynthesizedAnswer {
    SynthesizedAnswer::completion(explain(analysis, query).completion)
}
