//! The ORA completion API.
//!
//! There is no published ORA protocol to call, so [`SimulatedOra`] answers
//! locally with the rule-based synthesizer. Anything implementing
//! [`CompletionBackend`] can replace it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use oravision_config::OraConfig;
use oravision_core::{
    AnalysisResult, CompletionBackend, OraPrompt, OravisionError, SynthesizedAnswer,
};

use crate::context::describe_analysis;
use crate::synthesizer::explain;

pub const BACKEND_NAME: &str = "ora-simulated";

pub struct SimulatedOra {
    api_url: String,
}

impl SimulatedOra {
    pub fn new(config: &OraConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
        }
    }
}

impl Default for SimulatedOra {
    fn default() -> Self {
        Self::new(&OraConfig::default())
    }
}

#[async_trait]
impl CompletionBackend for SimulatedOra {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn complete(&self, prompt: &OraPrompt) -> Result<SynthesizedAnswer, OravisionError> {
        debug!(
            api_url = %self.api_url,
            context = %prompt.context,
            query = %prompt.query,
            "[ORA] Simulating completion"
        );
        let synthesis = explain(&prompt.analysis, &prompt.query);
        debug!(intent = %synthesis.intent, rule = synthesis.rule, "[ORA] Answer selected");
        Ok(SynthesizedAnswer::completion(synthesis.completion))
    }
}

/// Builds prompts and turns backend failures into error answers.
#[derive(Clone)]
pub struct OraClient {
    backend: Arc<dyn CompletionBackend>,
}

impl OraClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn simulated(config: &OraConfig) -> Self {
        Self::new(Arc::new(SimulatedOra::new(config)))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub async fn ask(&self, analysis: &AnalysisResult, query: &str) -> SynthesizedAnswer {
        let prompt = OraPrompt {
            context: describe_analysis(analysis),
            query: query.to_string(),
            analysis: analysis.clone(),
        };
        match self.backend.complete(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "ORA completion failed");
                SynthesizedAnswer::error(format!("Failed to get response from ORA: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branches::CAT_ANSWER;
    use oravision_core::{DetectedObject, Label};

    struct DownBackend;

    #[async_trait]
    impl CompletionBackend for DownBackend {
        fn name(&self) -> &str {
            "down"
        }
        async fn complete(&self, _: &OraPrompt) -> Result<SynthesizedAnswer, OravisionError> {
            Err(OravisionError::Malformed("timeout".into()))
        }
    }

    #[tokio::test]
    async fn simulated_backend_answers_with_synthesizer() {
        let client = OraClient::simulated(&OraConfig::default());
        let analysis = AnalysisResult {
            labels: vec![Label::new("Cat", 0.9)],
            text: String::new(),
            objects: vec![DetectedObject::new("Cat", 0.9)],
        };
        let answer = client.ask(&analysis, "what animal is this").await;
        assert_eq!(answer, SynthesizedAnswer::completion(CAT_ANSWER));
        assert_eq!(client.backend_name(), "ora-simulated");
    }

    #[tokio::test]
    async fn backend_error_becomes_error_answer() {
        let client = OraClient::new(Arc::new(DownBackend));
        let answer = client.ask(&AnalysisResult::default(), "hi").await;
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["error"], "Failed to get response from ORA: malformed response: timeout");
    }
}
