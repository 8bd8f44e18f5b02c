//! Shared test utilities

#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use dinebell::{
    Assistant, Error, ListenError, RestaurantDiscovery, Result, SpeechInput, SpeechOutput,
    TurnLoop,
};

/// Input that replays a fixed script, then reports the input closed
pub struct ScriptedInput {
    script: VecDeque<std::result::Result<String, ListenError>>,
}

impl ScriptedInput {
    /// Script of successfully heard utterances
    pub fn lines(lines: &[&str]) -> Self {
        Self {
            script: lines.iter().map(|l| Ok((*l).to_string())).collect(),
        }
    }

    /// Script mixing heard utterances and listen failures
    pub fn events(events: Vec<std::result::Result<&str, ListenError>>) -> Self {
        Self {
            script: events.into_iter().map(|e| e.map(str::to_string)).collect(),
        }
    }
}

#[async_trait(?Send)]
impl SpeechInput for ScriptedInput {
    async fn listen(&mut self) -> std::result::Result<String, ListenError> {
        self.script.pop_front().unwrap_or(Err(ListenError::Closed))
    }
}

/// Output that records every reply
#[derive(Default)]
pub struct CapturedOutput {
    pub replies: Vec<String>,
}

#[async_trait(?Send)]
impl SpeechOutput for CapturedOutput {
    async fn say(&mut self, text: &str) -> Result<()> {
        self.replies.push(text.to_string());
        Ok(())
    }
}

/// Discovery source that is always down
pub struct UnreachableDiscovery;

#[async_trait]
impl RestaurantDiscovery for UnreachableDiscovery {
    async fn discover(&self, _search: Option<&str>) -> Result<Vec<String>> {
        Err(Error::Discovery("connection refused".to_string()))
    }
}

/// Build a loop over a default assistant and a scripted input
pub fn scripted_loop(lines: &[&str]) -> TurnLoop<ScriptedInput, CapturedOutput> {
    TurnLoop::new(
        Assistant::default(),
        ScriptedInput::lines(lines),
        CapturedOutput::default(),
    )
}
