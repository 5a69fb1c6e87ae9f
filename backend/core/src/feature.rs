use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OravisionError;

/// Detection features understood by the `images:annotate` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureKind {
    LabelDetection,
    TextDetection,
    DocumentTextDetection,
    ObjectLocalization,
    FaceDetection,
    LandmarkDetection,
    LogoDetection,
    ImageProperties,
    SafeSearchDetection,
}

/// Features requested when the caller does not name any.
pub const DEFAULT_FEATURES: [FeatureKind; 3] = [
    FeatureKind::LabelDetection,
    FeatureKind::TextDetection,
    FeatureKind::ObjectLocalization,
];

impl FeatureKind {
    pub const ALL: [FeatureKind; 9] = [
        FeatureKind::LabelDetection,
        FeatureKind::TextDetection,
        FeatureKind::DocumentTextDetection,
        FeatureKind::ObjectLocalization,
        FeatureKind::FaceDetection,
        FeatureKind::LandmarkDetection,
        FeatureKind::LogoDetection,
        FeatureKind::ImageProperties,
        FeatureKind::SafeSearchDetection,
    ];

    /// Wire name, e.g. `LABEL_DETECTION`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::LabelDetection => "LABEL_DETECTION",
            FeatureKind::TextDetection => "TEXT_DETECTION",
            FeatureKind::DocumentTextDetection => "DOCUMENT_TEXT_DETECTION",
            FeatureKind::ObjectLocalization => "OBJECT_LOCALIZATION",
            FeatureKind::FaceDetection => "FACE_DETECTION",
            FeatureKind::LandmarkDetection => "LANDMARK_DETECTION",
            FeatureKind::LogoDetection => "LOGO_DETECTION",
            FeatureKind::ImageProperties => "IMAGE_PROPERTIES",
            FeatureKind::SafeSearchDetection => "SAFE_SEARCH_DETECTION",
        }
    }

    /// Parse a list of feature names, or return the defaults for an empty list.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<FeatureKind>, OravisionError> {
        if names.is_empty() {
            return Ok(DEFAULT_FEATURES.to_vec());
        }
        let mut features = Vec::with_capacity(names.len());
        for name in names {
            let kind: FeatureKind = name.as_ref().parse()?;
            if !features.contains(&kind) {
                features.push(kind);
            }
        }
        Ok(features)
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = OravisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', ' '], "_").to_ascii_uppercase();
        FeatureKind::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| OravisionError::UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("label_detection".parse::<FeatureKind>().unwrap(), FeatureKind::LabelDetection);
        assert_eq!(
            "Object-Localization".parse::<FeatureKind>().unwrap(),
            FeatureKind::ObjectLocalization
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "CROP_HINTS".parse::<FeatureKind>().unwrap_err();
        assert!(matches!(err, OravisionError::UnknownFeature(ref n) if n == "CROP_HINTS"));
    }

    #[test]
    fn empty_list_yields_defaults() {
        let empty: [&str; 0] = [];
        assert_eq!(FeatureKind::parse_list(&empty).unwrap(), DEFAULT_FEATURES.to_vec());
    }

    #[test]
    fn list_is_deduplicated_in_order() {
        let parsed =
            FeatureKind::parse_list(&["TEXT_DETECTION", "LABEL_DETECTION", "text_detection"])
                .unwrap();
        assert_eq!(parsed, vec![FeatureKind::TextDetection, FeatureKind::LabelDetection]);
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&FeatureKind::SafeSearchDetection).unwrap();
        assert_eq!(json, "\"SAFE_SEARCH_DETECTION\"");
    }
}
