//! Conversation renderer.
//!
//! [`Transcript`] is the append-only log of the conversation. Every append
//! moves the scroll position to the newest entry and notifies the attached
//! [`TranscriptView`], if any. There are no edit or removal operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The visitor.
    User,
    /// The gateway, or the widget speaking on its behalf.
    Bot,
}

impl ChatRole {
    /// Lowercase label (`"user"` / `"bot"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged transcript entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
}

impl ChatMessage {
    /// Create a message.
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.text)
    }
}

/// Presentation sink notified of every appended entry.
pub trait TranscriptView: Send {
    /// Render the entry at `index`.
    fn render(&mut self, index: usize, message: &ChatMessage);

    /// Bring the entry at `index` into view.
    fn scroll_to(&mut self, _index: usize) {}
}

/// Append-only conversation log.
#[derive(Default)]
pub struct Transcript {
    entries: Vec<ChatMessage>,
    scroll_position: Option<usize>,
    view: Option<Box<dyn TranscriptView>>,
}

impl Transcript {
    /// Empty transcript without a view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty transcript rendering into `view`.
    pub fn with_view(view: Box<dyn TranscriptView>) -> Self {
        Self {
            view: Some(view),
            ..Self::default()
        }
    }

    /// Append an entry, render it, and scroll to it.
    pub fn append(&mut self, role: ChatRole, text: impl Into<String>) -> &ChatMessage {
        let index = self.entries.len();
        self.entries.push(ChatMessage::new(role, text));
        self.scroll_position = Some(index);
        let message = &self.entries[index];
        if let Some(view) = self.view.as_mut() {
            view.render(index, message);
            view.scroll_to(index);
        }
        message
    }

    /// Append a user entry.
    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.append(ChatRole::User, text)
    }

    /// Append a bot entry.
    pub fn push_bot(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.append(ChatRole::Bot, text)
    }

    /// All entries in arrival order.
    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }

    /// Index currently scrolled into view (always the newest entry).
    pub fn scroll_position(&self) -> Option<usize> {
        self.scroll_position
    }

    /// Entries formatted as `"<role>: <text>"`.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Debug for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transcript")
            .field("entries", &self.entries)
            .field("scroll_position", &self.scroll_position)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}
