//! Lower-cased views over an [`AnalysisResult`], rebuilt for every request.

use oravision_core::AnalysisResult;

/// How many leading labels count as "main" labels.
pub const MAIN_LABEL_COUNT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    /// Every label description, lower-cased, in analysis order.
    pub labels: Vec<String>,
    /// The first [`MAIN_LABEL_COUNT`] labels.
    pub main_labels: Vec<String>,
    /// Every object name, lower-cased.
    pub main_objects: Vec<String>,
    /// Main labels then objects, first occurrence kept.
    pub entities: Vec<String>,
    /// Detected text with whitespace runs collapsed.
    pub text: String,
    /// Length in chars of the detected text as received, whitespace included.
    pub raw_text_chars: usize,
}

impl Scene {
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let labels: Vec<String> = analysis
            .labels
            .iter()
            .map(|l| l.description.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        let main_labels: Vec<String> = labels.iter().take(MAIN_LABEL_COUNT).cloned().collect();
        let main_objects: Vec<String> = analysis
            .objects
            .iter()
            .map(|o| o.name.trim().to_lowercase())
            .filter(|o| !o.is_empty())
            .collect();

        let mut entities: Vec<String> = Vec::with_capacity(main_labels.len() + main_objects.len());
        for entity in main_labels.iter().chain(main_objects.iter()) {
            if !entities.contains(entity) {
                entities.push(entity.clone());
            }
        }

        Self {
            labels,
            main_labels,
            main_objects,
            entities,
            text: analysis.text.split_whitespace().collect::<Vec<_>>().join(" "),
            raw_text_chars: analysis.text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.main_objects.is_empty() && self.text.is_empty()
    }

    pub fn top_label(&self) -> Option<&str> {
        self.main_labels.first().map(String::as_str)
    }

    pub fn top_labels(&self, n: usize) -> Vec<&str> {
        self.main_labels.iter().take(n).map(String::as_str).collect()
    }

    /// Main labels or objects containing any of `keywords`.
    pub fn mentions(&self, keywords: &[&str]) -> bool {
        self.main_labels
            .iter()
            .chain(self.main_objects.iter())
            .any(|e| keywords.iter().any(|k| e.contains(k)))
    }

    /// Main labels that contain any of `keywords`, in label order.
    pub fn main_labels_matching(&self, keywords: &[&str]) -> Vec<&str> {
        self.main_labels
            .iter()
            .filter(|l| keywords.iter().any(|k| l.contains(k)))
            .map(String::as_str)
            .collect()
    }

    /// Objects then labels, deduplicated, at most `limit` entries.
    pub fn summary_items(&self, limit: usize) -> Vec<&str> {
        let mut items: Vec<&str> = Vec::new();
        for e in self.main_objects.iter().chain(self.main_labels.iter()) {
            if items.len() == limit {
                break;
            }
            if !items.contains(&e.as_str()) {
                items.push(e);
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oravision_core::{DetectedObject, Label};

    fn analysis(labels: &[&str], objects: &[&str], text: &str) -> AnalysisResult {
        AnalysisResult {
            labels: labels.iter().map(|l| Label::new(*l, 0.9)).collect(),
            text: text.into(),
            objects: objects.iter().map(|o| DetectedObject::new(*o, 0.8)).collect(),
        }
    }

    #[test]
    fn keeps_top_five_labels_and_all_objects() {
        let a = analysis(&["A", "B", "C", "D", "E", "F"], &["X", "Y"], "");
        let scene = Scene::from_analysis(&a);
        assert_eq!(scene.labels.len(), 6);
        assert_eq!(scene.main_labels, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(scene.main_objects, vec!["x", "y"]);
    }

    #[test]
    fn entities_are_deduplicated_labels_first() {
        let a = analysis(&["Cat", "Pet"], &["Cat", "Bowl"], "");
        assert_eq!(Scene::from_analysis(&a).entities, vec!["cat", "pet", "bowl"]);
    }

    #[test]
    fn text_whitespace_is_collapsed() {
        let a = analysis(&[], &[], "  OPEN\n 24   HOURS \n");
        let scene = Scene::from_analysis(&a);
        assert_eq!(scene.text, "OPEN 24 HOURS");
        assert_eq!(scene.raw_text_chars, 20);
    }

    #[test]
    fn summary_prefers_objects() {
        let a = analysis(&["Table", "Cup"], &["Cup", "Spoon"], "");
        assert_eq!(Scene::from_analysis(&a).summary_items(3), vec!["cup", "spoon", "table"]);
    }

    #[test]
    fn building_a_scene_leaves_analysis_untouched() {
        let a = analysis(&["Dog"], &["Dog"], "Woof");
        let before = a.clone();
        let _ = Scene::from_analysis(&a);
        assert_eq!(a, before);
    }
}
