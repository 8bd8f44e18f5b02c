//! Turn loop
//!
//! Drives the conversation one utterance at a time: listen, normalize,
//! handle, speak. A turn is fully handled before the next utterance is
//! requested, and only the exit intent (or a closed input) ends the loop.

use async_trait::async_trait;
use thiserror::Error;

use crate::Result;
use crate::assistant::{Assistant, FAREWELL, WELCOME};
use crate::slots::{SlotExtractor, VocabularyExtractor};

/// Why no utterance was heard this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListenError {
    /// Speech was captured but could not be transcribed
    #[error("speech not recognised")]
    Unintelligible,
    /// The transcription backend could not be reached
    #[error("speech service unavailable")]
    ServiceUnavailable,
    /// The input source has ended
    #[error("input closed")]
    Closed,
}

impl ListenError {
    /// What to tell the user, if anything
    #[must_use]
    pub const fn prompt(self) -> Option<&'static str> {
        match self {
            Self::Unintelligible => Some("Sorry, I didn't catch that. Could you repeat?"),
            Self::ServiceUnavailable => {
                Some("Sorry, my speech service is down. Please try typing.")
            }
            Self::Closed => None,
        }
    }
}

/// Produces one utterance per call
#[async_trait(?Send)]
pub trait SpeechInput {
    /// Wait for the next utterance
    ///
    /// # Errors
    ///
    /// Returns a [`ListenError`] when nothing usable was heard
    async fn listen(&mut self) -> std::result::Result<String, ListenError>;
}

/// Delivers replies to the user
#[async_trait(?Send)]
pub trait SpeechOutput {
    /// Say one reply
    ///
    /// # Errors
    ///
    /// Returns error if the reply could not be delivered
    async fn say(&mut self, text: &str) -> Result<()>;
}

/// Whether the loop should keep going after a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Request another utterance
    Continue,
    /// The conversation is over
    Exit,
}

/// Totals for a finished conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Turns taken, including the final one
    pub turns: usize,
}

/// Runs a conversation between an input, an assistant and an output
pub struct TurnLoop<I, O, S = VocabularyExtractor> {
    assistant: Assistant<S>,
    input: I,
    output: O,
}

impl<I, O, S> TurnLoop<I, O, S>
where
    I: SpeechInput,
    O: SpeechOutput,
    S: SlotExtractor,
{
    /// Create a loop
    #[must_use]
    pub const fn new(assistant: Assistant<S>, input: I, output: O) -> Self {
        Self {
            assistant,
            input,
            output,
        }
    }

    /// The assistant handling turns
    #[must_use]
    pub const fn assistant(&self) -> &Assistant<S> {
        &self.assistant
    }

    /// The output collaborator
    #[must_use]
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Greet the user and run turns until the conversation ends
    pub async fn run(&mut self) -> LoopSummary {
        self.emit(WELCOME).await;

        let mut turns = 0;
        loop {
            turns += 1;
            if self.step().await == Flow::Exit {
                break;
            }
        }

        tracing::info!(turns, "conversation ended");
        LoopSummary { turns }
    }

    /// Run a single turn
    pub async fn step(&mut self) -> Flow {
        match self.input.listen().await {
            Ok(text) => {
                let utterance = text.trim().to_lowercase();
                if utterance.is_empty() {
                    self.silent_turn().await;
                    return Flow::Continue;
                }

                tracing::info!(utterance, "heard");
                let turn = self.assistant.handle(&utterance).await;
                for reply in &turn.replies {
                    self.emit(reply).await;
                }

                if turn.is_exit() {
                    Flow::Exit
                } else {
                    Flow::Continue
                }
            }
            Err(ListenError::Closed) => {
                tracing::info!("input closed");
                self.silent_turn().await;
                self.emit(FAREWELL).await;
                Flow::Exit
            }
            Err(e) => {
                tracing::warn!(error = %e, "nothing heard");
                if let Some(prompt) = e.prompt() {
                    self.emit(prompt).await;
                }
                self.silent_turn().await;
                Flow::Continue
            }
        }
    }

    /// A turn with no usable text only matters to a pending checkout
    async fn silent_turn(&mut self) {
        if let Some(turn) = self.assistant.handle_silence() {
            for reply in &turn.replies {
                self.emit(reply).await;
            }
        }
    }

    async fn emit(&mut self, text: &str) {
        if let Err(e) = self.output.say(text).await {
            tracing::error!(error = %e, "failed to deliver reply");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct Script(VecDeque<std::result::Result<String, ListenError>>);

    #[async_trait(?Send)]
    impl SpeechInput for Script {
        async fn listen(&mut self) -> std::result::Result<String, ListenError> {
            self.0.pop_front().unwrap_or(Err(ListenError::Closed))
        }
    }

    #[derive(Default)]
    struct Transcript(Vec<String>);

    #[async_trait(?Send)]
    impl SpeechOutput for Transcript {
        async fn say(&mut self, text: &str) -> Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    fn script(lines: &[&str]) -> Script {
        Script(lines.iter().map(|l| Ok((*l).to_string())).collect())
    }

    #[tokio::test]
    async fn test_exit_ends_loop() {
        let mut turns = TurnLoop::new(
            Assistant::default(),
            script(&["help", "Quit now", "help"]),
            Transcript::default(),
        );

        let summary = turns.run().await;
        assert_eq!(summary.turns, 2);
        assert_eq!(turns.output().0.first().map(String::as_str), Some(WELCOME));
        assert_eq!(turns.output().0.last().map(String::as_str), Some(FAREWELL));
    }

    #[tokio::test]
    async fn test_blank_utterance_is_noop() {
        let mut turns = TurnLoop::new(Assistant::default(), script(&["   "]), Transcript::default());

        assert_eq!(turns.step().await, Flow::Continue);
        assert!(turns.output().0.is_empty());
    }

    #[tokio::test]
    async fn test_failure_prompts() {
        let input = Script(VecDeque::from([
            Err(ListenError::Unintelligible),
            Err(ListenError::ServiceUnavailable),
        ]));
        let mut turns = TurnLoop::new(Assistant::default(), input, Transcript::default());

        turns.step().await;
        turns.step().await;
        assert_eq!(
            turns.output().0,
            [
                "Sorry, I didn't catch that. Could you repeat?",
                "Sorry, my speech service is down. Please try typing."
            ]
        );
    }
}
