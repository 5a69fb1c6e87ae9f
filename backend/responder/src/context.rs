//! Render an analysis as the plain-text context sent along with a query.

use oravision_core::AnalysisResult;

fn percent(score: f32) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

pub fn describe_analysis(analysis: &AnalysisResult) -> String {
    if analysis.is_empty() {
        return "No visual content detected.".to_string();
    }

    let mut lines = Vec::new();
    if !analysis.labels.is_empty() {
        let labels: Vec<String> = analysis
            .labels
            .iter()
            .map(|l| format!("{} ({}%)", l.description, percent(l.score)))
            .collect();
        lines.push(format!("Labels: {}", labels.join(", ")));
    }
    if !analysis.objects.is_empty() {
        let objects: Vec<String> = analysis
            .objects
            .iter()
            .map(|o| format!("{} ({}%)", o.name, percent(o.score)))
            .collect();
        lines.push(format!("Objects: {}", objects.join(", ")));
    }
    let text = analysis.text.trim();
    if !text.is_empty() {
        lines.push(format!("Text: \"{text}\""));
    }
    lines.join("\n")
}
