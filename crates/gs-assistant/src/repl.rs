//! Interactive read-line loop.
//!
//! Generic over the reader and writer so the same loop drives stdin/stdout
//! and in-memory buffers in tests. One turn is awaited to completion before
//! the next line is read.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::router::Router;
use crate::transcript::Transcript;

/// Printed (and logged) when a turn fails outright.
pub const GENERIC_APOLOGY: &str =
    "Sorry, I encountered an error. Please try again or call 1919 for assistance.";

/// Re-prompt for blank input.
pub const BLANK_INPUT_PROMPT: &str = "Please ask me something about government services.";

/// Inputs that end the session, compared case-insensitively.
pub const EXIT_WORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];

const FAREWELL: &str = "Thank you for using Sri Lankan Government Services!";

pub fn banner() -> String {
    let rule = "=".repeat(50);
    format!(
        "Sri Lankan Government Services Chatbot\n{rule}\nAsk me about:\n\
         • Required documents for services\n\
         • Application processes\n\
         • Department information\n\
         • General government services\n\
         {rule}\nType 'exit' to quit\n\n"
    )
}

pub fn is_exit(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    EXIT_WORDS.contains(&lower.as_str())
}

/// Run the loop until an exit word or end of input. Returns the transcript.
pub async fn run<R, W>(router: &Router, input: R, output: &mut W) -> anyhow::Result<Transcript>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut transcript = Transcript::new();
    converse(router, input, output, &mut transcript).await?;
    Ok(transcript)
}

/// The loop itself, logging into a caller-owned transcript so the turns so
/// far survive an I/O error. Bytes that are not UTF-8 are replaced, not
/// rejected.
pub async fn converse<R, W>(
    router: &Router,
    mut input: R,
    output: &mut W,
    transcript: &mut Transcript,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    output.write_all(banner().as_bytes()).await?;

    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            tracing::debug!("input closed");
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let text = line.trim();

        if is_exit(text) {
            break;
        }
        if text.is_empty() {
            output
                .write_all(format!("Bot: {BLANK_INPUT_PROMPT}\n\n").as_bytes())
                .await?;
            continue;
        }

        transcript.push_user(text);
        let reply = match router.reply(text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "turn failed");
                GENERIC_APOLOGY.to_string()
            }
        };
        transcript.push_bot(&reply);

        output
            .write_all(format!("Bot: {reply}\n\n").as_bytes())
            .await?;
    }

    output.flush().await
}

/// Run the loop, then write the transcript into `transcript_dir`. The
/// transcript is written even when the loop stops on an I/O error; that
/// error is returned afterwards.
pub async fn run_session<R, W>(
    router: &Router,
    input: R,
    output: &mut W,
    transcript_dir: &Path,
) -> anyhow::Result<PathBuf>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut transcript = Transcript::new();
    let outcome = converse(router, input, output, &mut transcript).await;
    let path = transcript.write_to_dir(transcript_dir, &Local::now().naive_local())?;

    if let Err(e) = outcome {
        tracing::error!(error = %e, path = %path.display(), "session ended on I/O error");
        return Err(e.into());
    }

    output
        .write_all(format!("\nConversation saved to {}\n{FAREWELL}\n", path.display()).as_bytes())
        .await?;
    output.flush().await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{IntentClassifier, RuleBasedClassifier};
    use async_trait::async_trait;
    use gs_protocol::Intent;
    use gs_store::MockStore;
    use std::io;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, AsyncReadExt, BufReader, ReadBuf};

    struct FailingClassifier;

    /// Reader that fails on every read, like a torn-down terminal.
    struct BrokenInput;

    impl AsyncRead for BrokenInput {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed")))
        }
    }

    #[async_trait]
    impl IntentClassifier for FailingClassifier {
        async fn classify(&self, _text: &str) -> anyhow::Result<Intent> {
            anyhow::bail!("boom")
        }

        fn policy_name(&self) -> &str {
            "failing"
        }
    }

    fn router() -> Router {
        Router::new(
            Arc::new(RuleBasedClassifier::new()),
            None,
            Arc::new(MockStore::with_sample_data()),
        )
    }

    #[test]
    fn exit_words() {
        for word in ["exit", "QUIT", " Bye ", "GoodBye"] {
            assert!(is_exit(word), "{word}");
        }
        assert!(!is_exit("exit now"));
        assert!(!is_exit(""));
    }

    #[tokio::test]
    async fn exit_ends_without_turns() {
        let mut out = Vec::new();
        let transcript = run(&router(), &b"exit\nhelp\n"[..], &mut out).await.unwrap();
        assert!(transcript.is_empty());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Sri Lankan Government Services Chatbot\n"));
        assert!(!printed.contains("Bot:"));
    }

    #[tokio::test]
    async fn blank_input_is_reprompted_not_logged() {
        let mut out = Vec::new();
        let transcript = run(&router(), &b"   \nquit\n"[..], &mut out).await.unwrap();
        assert!(transcript.is_empty());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(&format!("Bot: {BLANK_INPUT_PROMPT}")));
    }

    #[tokio::test]
    async fn turns_are_logged() {
        let mut out = Vec::new();
        let transcript = run(&router(), &b"I want to book an appointment\nbye\n"[..], &mut out)
            .await
            .unwrap();
        let lines = transcript.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "You: I want to book an appointment");
        assert!(lines[1].starts_with("Bot: Appointment Booking"));
    }

    #[tokio::test]
    async fn end_of_input_ends_session() {
        let mut out = Vec::new();
        let transcript = run(&router(), &b"help"[..], &mut out).await.unwrap();
        assert_eq!(transcript.lines().len(), 2);
    }

    #[tokio::test]
    async fn failed_turn_prints_generic_apology_and_continues() {
        let router = Router::new(
            Arc::new(FailingClassifier),
            None,
            Arc::new(MockStore::new()),
        );
        let mut out = Vec::new();
        let transcript = run(&router, &b"hello\nhello again\nexit\n"[..], &mut out)
            .await
            .unwrap();

        let expected = format!("Bot: {GENERIC_APOLOGY}");
        assert_eq!(
            transcript.lines(),
            &[
                "You: hello".to_string(),
                expected.clone(),
                "You: hello again".to_string(),
                expected,
            ]
        );
    }

    #[tokio::test]
    async fn invalid_utf8_is_an_ordinary_turn() {
        let mut out = Vec::new();
        let transcript = run(&router(), &b"caf\xe9 hours\nexit\n"[..], &mut out)
            .await
            .unwrap();

        let lines = transcript.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "You: caf\u{fffd} hours");
        assert!(lines[1].starts_with("Bot: Government Office Hours"));
    }

    #[tokio::test]
    async fn read_error_still_writes_transcript() {
        let dir = std::env::temp_dir().join(format!("gs-repl-broken-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let input = BufReader::new((&b"help\n"[..]).chain(BrokenInput));
        let mut out = Vec::new();
        let err = run_session(&router(), input, &mut out, &dir).await.unwrap_err();
        assert!(err.to_string().contains("stdin closed"));

        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);
        let path = files[0].as_ref().unwrap().path();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("You: help\nBot: Sri Lankan Government Services Portal"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
