//! Append-only conversation transcript, written once when the session ends.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

const TITLE: &str = "Sri Lankan Government Services - Conversation Log";
const FOOTER: &str = "End of Conversation";
const RULE_WIDTH: usize = 50;

/// Conversation lines in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: &str) {
        self.lines.push(format!("You: {text}"));
    }

    pub fn push_bot(&mut self, text: &str) {
        self.lines.push(format!("Bot: {text}"));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `conversation_log_YYYYMMDD_HHMMSS.txt`
    pub fn file_name(at: &NaiveDateTime) -> String {
        format!("conversation_log_{}.txt", at.format("%Y%m%d_%H%M%S"))
    }

    /// Full file contents: header, lines, footer.
    pub fn render(&self, at: &NaiveDateTime) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = format!(
            "{TITLE}\n{rule}\nDate: {}\n{rule}\n\n",
            at.format("%Y-%m-%d %H:%M:%S")
        );
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str(FOOTER);
        out
    }

    /// Write the transcript into `dir`, returning the file path.
    pub fn write_to_dir(&self, dir: &Path, at: &NaiveDateTime) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::file_name(at));
        std::fs::write(&path, self.render(at))?;
        tracing::info!(path = %path.display(), lines = self.lines.len(), "transcript written");
        Ok(path)
    }
}
