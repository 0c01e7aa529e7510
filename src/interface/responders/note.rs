//! # Note Responder
//!
//! Handles `note add|show|del|update ...`.
//! Notes are kept per sender and addressed by their index, starting from 0.
//! Every action is a read-modify-write of the whole note book, serialized by `lock`.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::traits::{NoteStore, Responder};
use crate::domain::types::RequestContext;
use crate::strings::messages;

const ACTIONS: &[&str] = &["add", "del", "show", "update"];

/// Parsed form of the detail of `show` and `del`.
#[derive(Debug, PartialEq, Eq)]
enum Target<'a> {
    All,
    /// Raw digits as typed, so replies echo the user's index.
    Index(&'a str),
}

impl<'a> Target<'a> {
    fn parse(detail: &'a str) -> Option<Self> {
        if detail == "all" {
            Some(Target::All)
        } else if is_index(detail) {
            Some(Target::Index(detail))
        } else {
            None
        }
    }
}

fn is_index(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Digits too large for `usize` are out of range for any note list.
fn to_index(digits: &str) -> usize {
    digits.parse().unwrap_or(usize::MAX)
}

pub struct NoteResponder {
    store: Arc<dyn NoteStore>,
    lock: Mutex<()>,
}

impl NoteResponder {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    async fn add(&self, user: &str, note: &str) -> Result<String> {
        if note.trim().is_empty() {
            return Ok(messages::NOTE_EMPTY.to_string());
        }
        let mut book = self.store.read().await?;
        book.entry(user.to_string())
            .or_default()
            .push(note.to_string());
        self.store.write(&book).await?;
        Ok(messages::NOTE_SAVED.to_string())
    }

    async fn show_all(&self, user: &str) -> Result<String> {
        let book = self.store.read().await?;
        let notes = match book.get(user) {
            Some(notes) if !notes.is_empty() => notes,
            _ => return Ok(messages::NO_NOTES.to_string()),
        };
        Ok(notes
            .iter()
            .enumerate()
            .map(|(i, note)| messages::note_line(i, note))
            .collect())
    }

    async fn show_index(&self, user: &str, index: &str) -> Result<String> {
        let book = self.store.read().await?;
        let Some(notes) = book.get(user) else {
            return Ok(messages::NO_NOTES_BY_INDEX.to_string());
        };
        if notes.is_empty() {
            return Ok(messages::NO_NOTES.to_string());
        }
        Ok(match notes.get(to_index(index)) {
            Some(note) => note.clone(),
            None => messages::index_out_of_range(notes.len()),
        })
    }

    async fn delete_all(&self, user: &str) -> Result<String> {
        let mut book = self.store.read().await?;
        let Some(notes) = book.get_mut(user) else {
            return Ok(messages::NO_NOTES.to_string());
        };
        notes.clear();
        self.store.write(&book).await?;
        Ok(messages::NOTES_CLEARED.to_string())
    }

    async fn delete_index(&self, user: &str, index: &str) -> Result<String> {
        let mut book = self.store.read().await?;
        let notes = match book.get_mut(user) {
            Some(notes) if !notes.is_empty() => notes,
            _ => return Ok(messages::NO_NOTES.to_string()),
        };
        let i = to_index(index);
        if i >= notes.len() {
            return Ok(messages::index_out_of_range(notes.len()));
        }
        notes.remove(i);
        self.store.write(&book).await?;
        Ok(messages::note_deleted(index))
    }

    async fn update(&self, user: &str, index: &str, note: &str) -> Result<String> {
        if note.trim().is_empty() {
            return Ok(messages::NOTE_EMPTY.to_string());
        }
        let mut book = self.store.read().await?;
        let notes = match book.get_mut(user) {
            Some(notes) if !notes.is_empty() => notes,
            _ => return Ok(messages::NO_NOTES.to_string()),
        };
        let i = to_index(index);
        if i >= notes.len() {
            return Ok(messages::index_out_of_range(notes.len()));
        }
        notes[i] = note.to_string();
        self.store.write(&book).await?;
        Ok(messages::note_updated(index))
    }
}

#[async_trait]
impl Responder for NoteResponder {
    fn key(&self) -> &str {
        "note"
    }

    fn is_complex(&self) -> bool {
        true
    }

    fn actions(&self) -> &[&str] {
        ACTIONS
    }

    async fn respond(&self, ctx: &RequestContext) -> Result<Option<String>> {
        let (Some(action), Some(detail)) = (ctx.action(), ctx.detail()) else {
            return Ok(None);
        };
        let user = ctx.sender.as_str();
        let _guard = self.lock.lock().await;

        let reply = match action {
            "add" => self.add(user, detail).await?,
            "show" => match Target::parse(detail) {
                Some(Target::All) => self.show_all(user).await?,
                Some(Target::Index(i)) => self.show_index(user, i).await?,
                None => return Ok(None),
            },
            "del" => match Target::parse(detail) {
                Some(Target::All) => self.delete_all(user).await?,
                Some(Target::Index(i)) => self.delete_index(user, i).await?,
                None => return Ok(None),
            },
            "update" => {
                let (index, note) = detail.split_once(' ').unwrap_or((detail, ""));
                if !is_index(index) {
                    return Ok(None);
                }
                self.update(user, index, note).await?
            }
            _ => return Ok(None),
        };
        Ok(Some(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{NoteBook, ParsedRequest};

    #[derive(Default)]
    struct MemoryStore {
        book: std::sync::Mutex<NoteBook>,
    }

    #[async_trait]
    impl NoteStore for MemoryStore {
        async fn read(&self) -> Result<NoteBook> {
            Ok(self.book.lock().unwrap().clone())
        }
        async fn write(&self, notes: &NoteBook) -> Result<()> {
            *self.book.lock().unwrap() = notes.clone();
            Ok(())
        }
    }

    async fn send(responder: &NoteResponder, user: &str, action: &str, detail: &str) -> Option<String> {
        let ctx = RequestContext::new(user, ParsedRequest::complex("note", action, detail));
        responder.respond(&ctx).await.unwrap()
    }

    fn responder() -> (NoteResponder, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (NoteResponder::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_add_and_show() {
        let (r, store) = responder();
        assert_eq!(
            send(&r, "alice", "add", "buy milk").await.as_deref(),
            Some("Successfully saved your note")
        );
        send(&r, "alice", "add", "call bob").await;

        assert_eq!(send(&r, "alice", "show", "1").await.as_deref(), Some("call bob"));
        assert_eq!(
            send(&r, "alice", "show", "all").await.as_deref(),
            Some("0: buy milk\n\n1: call bob\n\n")
        );
        assert_eq!(store.book.lock().unwrap()["alice"].len(), 2);
    }

    #[tokio::test]
    async fn test_show_out_of_range() {
        let (r, _) = responder();
        send(&r, "alice", "add", "one").await;
        send(&r, "alice", "add", "two").await;
        assert_eq!(
            send(&r, "alice", "show", "3").await.as_deref(),
            Some("Index out of range, should be in [0, 1]")
        );
        assert_eq!(
            send(&r, "alice", "show", "99999999999999999999999").await.as_deref(),
            Some("Index out of range, should be in [0, 1]")
        );
    }

    #[tokio::test]
    async fn test_notes_are_per_sender() {
        let (r, _) = responder();
        send(&r, "alice", "add", "secret").await;
        assert_eq!(
            send(&r, "bob", "show", "0").await.as_deref(),
            Some("No notes found by given index")
        );
        assert_eq!(send(&r, "bob", "show", "all").await.as_deref(), Some("No notes found"));
        assert_eq!(send(&r, "bob", "del", "all").await.as_deref(), Some("No notes found"));
    }

    #[tokio::test]
    async fn test_delete() {
        let (r, _) = responder();
        send(&r, "alice", "add", "one").await;
        send(&r, "alice", "add", "two").await;

        assert_eq!(
            send(&r, "alice", "del", "0").await.as_deref(),
            Some("Successfully deleted note at index: 0")
        );
        assert_eq!(send(&r, "alice", "show", "0").await.as_deref(), Some("two"));
        assert_eq!(
            send(&r, "alice", "del", "5").await.as_deref(),
            Some("Index out of range, should be in [0, 0]")
        );
        assert_eq!(
            send(&r, "alice", "del", "all").await.as_deref(),
            Some("Successfully deleted all the notes")
        );
        assert_eq!(send(&r, "alice", "show", "0").await.as_deref(), Some("No notes found"));
        assert_eq!(send(&r, "alice", "del", "0").await.as_deref(), Some("No notes found"));
    }

    #[tokio::test]
    async fn test_update() {
        let (r, _) = responder();
        send(&r, "alice", "add", "old").await;
        assert_eq!(
            send(&r, "alice", "update", "0 brand new text").await.as_deref(),
            Some("Successfully updated note at index: 0")
        );
        assert_eq!(send(&r, "alice", "show", "0").await.as_deref(), Some("brand new text"));
        assert_eq!(
            send(&r, "alice", "update", "4 nope").await.as_deref(),
            Some("Index out of range, should be in [0, 0]")
        );
        assert_eq!(send(&r, "alice", "update", "0").await.as_deref(), Some("Note cannot be empty"));
    }

    #[tokio::test]
    async fn test_malformed_detail_declines() {
        let (r, _) = responder();
        send(&r, "alice", "add", "one").await;
        assert_eq!(send(&r, "alice", "show", "first").await, None);
        assert_eq!(send(&r, "alice", "del", "-1").await, None);
        assert_eq!(send(&r, "alice", "update", "x new").await, None);
    }
}
