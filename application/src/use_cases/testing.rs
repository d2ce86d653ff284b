//! Test doubles shared by the use case tests.

use crate::ports::artifact_store::{Artifact, ArtifactError, ArtifactStore};
use crate::ports::llm_gateway::{Completion, GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use pantheon_domain::{EvaluationFile, Phase, SolutionsFile, TaskContext};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Call {
    pub model_id: String,
    pub prompt: String,
    pub max_tokens: u32,
}

type Responder = Box<dyn FnOnce(&str) -> Result<String, GatewayError> + Send>;

/// Gateway returning queued responses per model id, one per call
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<HashMap<String, VecDeque<Responder>>>,
    delays: HashMap<String, u64>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, model_id: &str, text: &str) -> Self {
        let text = text.to_string();
        self.push(model_id, Box::new(move |_| Ok(text)))
    }

    pub fn fail(self, model_id: &str, error: GatewayError) -> Self {
        self.push(model_id, Box::new(move |_| Err(error)))
    }

    /// Queue a response computed from the prompt the model receives
    pub fn respond_with<F>(self, model_id: &str, responder: F) -> Self
    where
        F: FnOnce(&str) -> String + Send + 'static,
    {
        self.push(model_id, Box::new(move |prompt| Ok(responder(prompt))))
    }

    pub fn with_delay(mut self, model_id: &str, millis: u64) -> Self {
        self.delays.insert(model_id.to_string(), millis);
        self
    }

    fn push(self, model_id: &str, response: Responder) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(model_id.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, model_id: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.model_id == model_id)
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(
        &self,
        model_id: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Completion, GatewayError> {
        self.calls.lock().unwrap().push(Call {
            model_id: model_id.to_string(),
            prompt: prompt.to_string(),
            max_tokens,
        });

        if let Some(millis) = self.delays.get(model_id) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(model_id)
            .and_then(|queue| queue.pop_front());

        match next {
            Some(responder) => responder(prompt).map(|text| Completion::new(text, 42)),
            None => Err(GatewayError::Other(format!(
                "no scripted response for {}",
                model_id
            ))),
        }
    }
}

/// In-memory artifact store
#[derive(Default)]
pub struct MemoryStore {
    context: Option<TaskContext>,
    solutions: Mutex<Option<SolutionsFile>>,
    evaluation: Mutex<Option<EvaluationFile>>,
}

impl MemoryStore {
    pub fn with_context(context: TaskContext) -> Self {
        Self {
            context: Some(context),
            ..Self::default()
        }
    }

    pub fn with_solutions(self, solutions: SolutionsFile) -> Self {
        *self.solutions.lock().unwrap() = Some(solutions);
        self
    }

    pub fn saved_solutions(&self) -> Option<SolutionsFile> {
        self.solutions.lock().unwrap().clone()
    }

    pub fn saved_evaluation(&self) -> Option<EvaluationFile> {
        self.evaluation.lock().unwrap().clone()
    }

    fn not_found(artifact: Artifact) -> ArtifactError {
        ArtifactError::NotFound {
            artifact,
            dir: "memory".to_string(),
        }
    }
}

impl ArtifactStore for MemoryStore {
    fn load_context(&self) -> Result<TaskContext, ArtifactError> {
        self.context
            .clone()
            .ok_or_else(|| Self::not_found(Artifact::Context))
    }

    fn load_solutions(&self) -> Result<SolutionsFile, ArtifactError> {
        self.saved_solutions()
            .ok_or_else(|| Self::not_found(Artifact::Solutions))
    }

    fn save_solutions(&self, solutions: &SolutionsFile) -> Result<(), ArtifactError> {
        *self.solutions.lock().unwrap() = Some(solutions.clone());
        Ok(())
    }

    fn load_evaluation(&self) -> Result<Option<EvaluationFile>, ArtifactError> {
        Ok(self.saved_evaluation())
    }

    fn save_evaluation(&self, evaluation: &EvaluationFile) -> Result<(), ArtifactError> {
        *self.evaluation.lock().unwrap() = Some(evaluation.clone());
        Ok(())
    }
}

/// Progress notifier that records every callback as a short line
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        self.record(format!("start {} {}", phase, total_tasks));
    }

    fn on_task_complete(&self, phase: &Phase, model: &str, success: bool) {
        self.record(format!("done {} {} {}", phase, model, success));
    }

    fn on_retry(&self, phase: &Phase, model: &str) {
        self.record(format!("retry {} {}", phase, model));
    }

    fn on_phase_complete(&self, phase: &Phase) {
        self.record(format!("end {}", phase));
    }
}
