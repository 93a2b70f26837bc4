//! Offline generators for tests.

use std::sync::Mutex;
use std::time::Duration;

use super::{GenerationError, TextGenerator};

/// Returns a canned response and records the last prompt it saw.
pub(crate) struct StubGenerator {
    response: Result<String, GenerationError>,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    pub(crate) fn ok(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    pub(crate) fn err(error: GenerationError) -> Self {
        Self {
            response: Err(error),
            last_prompt: Mutex::new(None),
        }
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.response.clone()
    }
}

/// Never answers within any reasonable timeout.
pub(crate) struct SlowGenerator(pub(crate) Duration);

impl TextGenerator for SlowGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(self.0).await;
        Ok(String::new())
    }
}
