//! Demo runner: bundled (image, question) pairs run end to end.

use anyhow::Result;

use oravision_core::{AnalysisResult, ImageRef, SynthesizedAnswer};
use oravision_responder::OraClient;
use oravision_understanding::VisionAdapter;

use crate::terminal_output::{dim, heading, note_info, note_warn, render_table};

/// First bytes of a JFIF file; enough for the adapter to treat it as a JPEG.
const JPEG_HEADER: [u8; 12] = [
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
];
const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const LANDSCAPE_URL: &str =
    "https://storage.googleapis.com/cloud-samples-data/vision/landmark/st_basils.jpeg";

pub struct Sample {
    pub title: &'static str,
    pub image: String,
    pub query: &'static str,
}

impl Sample {
    fn new(title: &'static str, image: &str, query: &'static str) -> Self {
        Self { title, image: image.to_string(), query }
    }
}

pub fn samples() -> Vec<Sample> {
    let watch = ImageRef::from_bytes(&JPEG_HEADER, "image/jpeg").to_uri();
    let product = ImageRef::from_bytes(&PNG_HEADER, "image/png").to_uri();
    let landscape = LANDSCAPE_URL.to_string();
    vec![
        Sample::new("Luxury watch", &watch, "What brand is this watch?"),
        Sample::new("Watch, asked about color", &watch, "What color is it?"),
        Sample::new("Product shot", &product, "What objects are in this image?"),
        Sample::new("Product text", &product, "What does the label say?"),
        Sample::new("Landscape", &landscape, "Where was this taken?"),
        Sample::new("Landscape, asked about animals", &landscape, "What animal is this?"),
        Sample::new("Landscape, open question", &landscape, "Describe this image"),
    ]
}

pub struct DemoResult {
    pub analysis: AnalysisResult,
    pub answer: SynthesizedAnswer,
    pub fallback: bool,
}

pub async fn run_sample(
    vision: &VisionAdapter,
    ora: &OraClient,
    sample: &Sample,
) -> Result<DemoResult> {
    let outcome = vision.analyze_with_outcome(&sample.image, &[]).await?;
    let answer = ora.ask(&outcome.result, sample.query).await;
    Ok(DemoResult {
        analysis: outcome.result,
        answer,
        fallback: outcome.fallback,
    })
}

fn row(kind: &str, name: &str, score: f32) -> Vec<String> {
    vec![kind.to_string(), name.to_string(), format!("{:.0}%", score * 100.0)]
}

fn label_rows(analysis: &AnalysisResult) -> Vec<Vec<String>> {
    let labels = analysis.labels.iter().map(|l| row("label", &l.description, l.score));
    let objects = analysis.objects.iter().map(|o| row("object", &o.name, o.score));
    labels.chain(objects).collect()
}

pub async fn run(vision: &VisionAdapter, ora: &OraClient) -> Result<()> {
    note_info(&format!(
        "Vision backend: {}, ORA backend: {}",
        vision.backend_name(),
        ora.backend_name()
    ));

    for (i, sample) in samples().iter().enumerate() {
        println!();
        println!("{}", heading(&format!("[{}] {}", i + 1, sample.title)));
        println!("{}", dim(&format!("image: {}", ImageRef::parse(&sample.image)?)));

        let result = run_sample(vision, ora, sample).await?;
        if result.fallback {
            note_warn("Fixture analysis (no live vision backend answered)");
        }
        print!("{}", render_table(&["Kind", "Name", "Score"], &label_rows(&result.analysis)));
        if !result.analysis.text.trim().is_empty() {
            println!("  text: {:?}", result.analysis.text.trim());
        }

        println!("Q: {}", sample.query);
        match &result.answer {
            SynthesizedAnswer::Completion { completion } => println!("A: {completion}"),
            SynthesizedAnswer::Error { error } => println!("A: (error) {error}"),
        }
    }
    Ok(())
}
