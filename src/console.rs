//! Typed input and printed output

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::Result;
use crate::turn::{ListenError, SpeechInput, SpeechOutput};

/// Reads one utterance per line
pub struct ConsoleInput<R = BufReader<Stdin>> {
    lines: Lines<R>,
    prompt: bool,
}

impl ConsoleInput {
    /// Read utterances from standard input
    #[must_use]
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            prompt: true,
        }
    }
}

impl<R: AsyncBufRead + Unpin> ConsoleInput<R> {
    /// Read utterances from any buffered reader, without prompting
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            prompt: false,
        }
    }
}

#[async_trait(?Send)]
impl<R: AsyncBufRead + Unpin> SpeechInput for ConsoleInput<R> {
    async fn listen(&mut self) -> std::result::Result<String, ListenError> {
        if self.prompt {
            print!("You: ");
            std::io::stdout().flush().ok();
        }

        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(ListenError::Closed),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input line");
                Err(ListenError::Unintelligible)
            }
        }
    }
}

/// Prints replies to standard output
#[derive(Debug, Default)]
pub struct ConsoleOutput;

#[async_trait(?Send)]
impl SpeechOutput for ConsoleOutput {
    async fn say(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "System: {text}")?;
        stdout.flush()?;
        Ok(())
    }
}
