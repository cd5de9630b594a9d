use std::cell::Cell;
use std::vec::Vec;

use super::dto::{ChatMessage, Role};
use crate::backend::client::BackendClient;

pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// What the input box should do with a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    InsertNewline,
}

/// Plain Enter submits, Shift+Enter inserts a literal line break.
pub fn enter_action(shift: bool) -> InputAction {
    if shift {
        InputAction::InsertNewline
    } else {
        InputAction::Submit
    }
}

/// Owns one conversation view: the transcript, the draft input, and the
/// transient typing placeholder. Stateless beyond that.
pub struct ChatWidget {
    client: BackendClient,
    transcript: Vec<ChatMessage>,
    draft: String,
    typing: Cell<bool>,
    pending: Cell<bool>,
    revision: u64,
    scroll_anchor: usize,
}

/// Raises the typing placeholder and the pending guard on creation and
/// releases both on drop, whichever way the request settles.
struct TypingGuard<'a> {
    typing: &'a Cell<bool>,
    pending: &'a Cell<bool>,
}

impl<'a> TypingGuard<'a> {
    fn raise(typing: &'a Cell<bool>, pending: &'a Cell<bool>) -> Self {
        typing.set(true);
        pending.set(true);
        TypingGuard { typing, pending }
    }
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.typing.set(false);
        self.pending.set(false);
    }
}

impl ChatWidget {
    pub fn new(client: BackendClient) -> Self {
        ChatWidget {
            client,
            transcript: Vec::new(),
            draft: String::new(),
            typing: Cell::new(false),
            pending: Cell::new(false),
            revision: 0,
            scroll_anchor: 0,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// The transient "typing" placeholder is visible while a request is in
    /// flight.
    pub fn is_typing(&self) -> bool {
        self.typing.get()
    }

    /// Bumped on every transcript mutation; the view re-renders on change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Index of the message the view is pinned to; always the newest one.
    pub fn scroll_anchor(&self) -> usize {
        self.scroll_anchor
    }

    /// Key handling for the input box. Returns true when the caller should
    /// run `submit`.
    pub fn enter_pressed(&mut self, shift: bool) -> bool {
        match enter_action(shift) {
            InputAction::Submit => true,
            InputAction::InsertNewline => {
                self.draft.push('\n');
                false
            }
        }
    }

    /// Quick-question shortcut: populate the draft and go through the one
    /// submit path.
    pub async fn quick_question(&mut self, question: &str) {
        self.draft = String::from(question);
        self.submit().await;
    }

    pub async fn submit(&mut self) {
        let text = self.draft.clone();
        self.submit_user_message(&text).await;
    }

    /// The whole send round trip. Blank input is a no-op with no request.
    /// Exactly one system message lands per attempt: the reply on success,
    /// the fixed fallback on any failure (server, decode, or transport); the
    /// distinction is only logged.
    pub async fn submit_user_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.pending.get() {
            log::debug!("chat submit ignored, a request is already in flight");
            return;
        }
        self.push(ChatMessage::new(Role::User, text));
        self.draft.clear();
        let client = self.client.clone();
        let result = {
            let _typing = TypingGuard::raise(&self.typing, &self.pending);
            client.send_chat_message(text).await
        };
        match result {
            Ok(reply) => self.push(ChatMessage::new(Role::Bot, reply)),
            Err(e) => {
                log::error!("chat request failed: {:?}", e);
                self.push(ChatMessage::new(Role::Bot, FALLBACK_REPLY));
            }
        }
    }

    fn push(&mut self, msg: ChatMessage) {
        self.transcript.push(msg);
        self.revision += 1;
        self.scroll_anchor = self.transcript.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_submits_and_shift_enter_inserts_newline() {
        assert_eq!(enter_action(false), InputAction::Submit);
        assert_eq!(enter_action(true), InputAction::InsertNewline);
    }

    #[test]
    fn typing_guard_releases_on_drop() {
        let typing = Cell::new(false);
        let pending = Cell::new(false);
        {
            let _g = TypingGuard::raise(&typing, &pending);
            assert!(typing.get());
            assert!(pending.get());
        }
        assert!(!typing.get());
        assert!(!pending.get());
    }
}
