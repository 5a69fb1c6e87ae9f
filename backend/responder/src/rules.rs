/// Ordered rule tables.
///
/// A table is a slice of [`Rule`]s; evaluation stops at the first rule whose
/// predicate holds. Tables are plain constants so their order is the whole
/// tie-break policy.
use crate::scene::Scene;

/// Everything a rule may look at for one request.
#[derive(Debug, Clone)]
pub struct Turn {
    pub scene: Scene,
    /// Query, lower-cased.
    pub query: String,
}

impl Turn {
    pub fn new(scene: Scene, query: &str) -> Self {
        Self {
            scene,
            query: query.to_lowercase(),
        }
    }

    /// True when the query contains any of `keywords`.
    pub fn query_mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.query.contains(k))
    }
}

pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Turn) -> bool,
    pub respond: fn(&Turn) -> String,
}

/// The rule that fired and what it rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    pub rule: &'static str,
    pub text: String,
}

/// Evaluate `rules` in order; the first applicable rule renders the answer.
pub fn first_match(rules: &[Rule], turn: &Turn) -> Option<Fired> {
    rules.iter().find(|r| (r.applies)(turn)).map(|r| Fired {
        rule: r.name,
        text: (r.respond)(turn),
    })
}

/// Predicate that always holds; closes a table.
pub fn always(_: &Turn) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use oravision_core::AnalysisResult;

    fn says_a(_: &Turn) -> String {
        "a".into()
    }
    fn says_b(_: &Turn) -> String {
        "b".into()
    }
    fn mentions_x(t: &Turn) -> bool {
        t.query.contains('x')
    }

    const TABLE: &[Rule] = &[
        Rule { name: "x", applies: mentions_x, respond: says_a },
        Rule { name: "fallback", applies: always, respond: says_b },
    ];

    fn turn(query: &str) -> Turn {
        Turn::new(Scene::from_analysis(&AnalysisResult::default()), query)
    }

    #[test]
    fn first_applicable_rule_wins() {
        let fired = first_match(TABLE, &turn("an X here")).unwrap();
        assert_eq!(fired, Fired { rule: "x", text: "a".into() });
    }

    #[test]
    fn falls_through_to_catch_all() {
        assert_eq!(first_match(TABLE, &turn("nothing")).unwrap().rule, "fallback");
    }

    #[test]
    fn empty_table_matches_nothing() {
        assert!(first_match(&[], &turn("anything")).is_none());
    }
}
