//! Text buffer - mutable document content with edit notification
//!
//! The buffer owns the character sequence and is the sole source of truth
//! for document content. Every mutation is validated, applied, and then
//! announced synchronously to subscribed listeners as an [`EditEvent`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{HiliteError, Result};

/// The kind of mutation an [`EditEvent`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Text inserted at `offset`, `len` bytes long
    Insert,
    /// Text removed starting at `offset`, `len` bytes long
    Delete,
    /// Entire content replaced; `len` is the length of the prior content
    Replace,
}

/// A single buffer mutation
///
/// Emitted after the buffer's content already reflects the change, so a
/// listener reading the buffer sees post-edit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent {
    pub kind: EditKind,
    /// Byte offset where the mutation starts
    pub offset: usize,
    /// Extent of the mutation in bytes (see [`EditKind`] for the meaning)
    pub len: usize,
}

/// Handle identifying a listener subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&TextBuffer, EditEvent)>;

/// A mutable UTF-8 text buffer with synchronous change notification
///
/// All methods take `&self`; content and the listener table live behind
/// interior mutability so a listener may re-enter the buffer (read it,
/// mutate it, or change subscriptions) from inside a notification.
pub struct TextBuffer {
    text: RefCell<String>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            text: RefCell::new(String::new()),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Get a snapshot of the full current content
    pub fn get_text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Get the content length in bytes
    pub fn len(&self) -> usize {
        self.text.borrow().len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.borrow().is_empty()
    }

    /// Replace the entire content in one operation
    ///
    /// Emits exactly one [`EditKind::Replace`] event covering the prior
    /// extent, regardless of how many lines the new content has. Bulk
    /// loads must use this rather than per-line inserts.
    pub fn set_text(&self, new_text: &str) {
        let prior_len = {
            let mut text = self.text.borrow_mut();
            let prior_len = text.len();
            text.clear();
            text.push_str(new_text);
            prior_len
        };
        self.emit(EditEvent {
            kind: EditKind::Replace,
            offset: 0,
            len: prior_len,
        });
    }

    /// Insert text at a byte offset
    ///
    /// The offset must be within bounds and on a `char` boundary;
    /// otherwise the buffer is left unchanged and the edit is rejected.
    pub fn insert(&self, offset: usize, insert_text: &str) -> Result<()> {
        {
            let mut text = self.text.borrow_mut();
            if offset > text.len() || !text.is_char_boundary(offset) {
                return Err(HiliteError::OutOfRange {
                    offset,
                    len: insert_text.len(),
                    buffer_len: text.len(),
                });
            }
            text.insert_str(offset, insert_text);
        }
        self.emit(EditEvent {
            kind: EditKind::Insert,
            offset,
            len: insert_text.len(),
        });
        Ok(())
    }

    /// Delete a byte range starting at an offset
    ///
    /// Both ends of the range must be within bounds and on `char`
    /// boundaries; otherwise the buffer is left unchanged.
    pub fn delete(&self, offset: usize, len: usize) -> Result<()> {
        {
            let mut text = self.text.borrow_mut();
            let end = offset.checked_add(len).unwrap_or(usize::MAX);
            if end > text.len() || !text.is_char_boundary(offset) || !text.is_char_boundary(end) {
                return Err(HiliteError::OutOfRange {
                    offset,
                    len,
                    buffer_len: text.len(),
                });
            }
            text.replace_range(offset..end, "");
        }
        self.emit(EditEvent {
            kind: EditKind::Delete,
            offset,
            len,
        });
        Ok(())
    }

    /// Register a listener for edit events
    ///
    /// Listeners are called synchronously on the mutating call stack, in
    /// subscription order, after the content reflects the change.
    pub fn subscribe(&self, listener: impl Fn(&TextBuffer, EditEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener; returns false if the handle was unknown
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Notify all current listeners of an event
    ///
    /// The listener table is snapshotted first so listeners may subscribe,
    /// unsubscribe, or mutate the buffer re-entrantly without invalidating
    /// the iteration. A listener removed mid-round still sees this event.
    fn emit(&self, event: EditEvent) {
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            (*listener)(self, event);
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn recording_buffer() -> (Rc<TextBuffer>, Rc<RefCell<Vec<EditEvent>>>) {
        let buffer = Rc::new(TextBuffer::new());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        buffer.subscribe(move |_, event| sink.borrow_mut().push(event));
        (buffer, events)
    }

    #[test]
    fn test_set_text_round_trip() {
        let buffer = TextBuffer::new();
        let content = "say \"hello\" // not a comment in a string";
        buffer.set_text(content);
        assert_eq!(buffer.get_text(), content);
    }

    #[test]
    fn test_insert_and_delete() {
        let buffer = TextBuffer::new();
        buffer.set_text("hello world");
        buffer.insert(5, ",").unwrap();
        assert_eq!(buffer.get_text(), "hello, world");
        buffer.delete(5, 1).unwrap();
        assert_eq!(buffer.get_text(), "hello world");
    }

    #[test]
    fn test_insert_out_of_range_leaves_content() {
        let buffer = TextBuffer::new();
        buffer.set_text("abc");
        let before = buffer.get_text();
        let err = buffer.insert(4, "x").unwrap_err();
        assert!(matches!(err, HiliteError::OutOfRange { offset: 4, .. }));
        assert_eq!(buffer.get_text(), before);
    }

    #[test]
    fn test_delete_out_of_range_leaves_content() {
        let buffer = TextBuffer::new();
        buffer.set_text("abc");
        let before = buffer.get_text();
        assert!(buffer.delete(buffer.len() + 1, 1).is_err());
        assert!(buffer.delete(2, 5).is_err());
        assert_eq!(buffer.get_text(), before);
    }

    #[test]
    fn test_edit_inside_multibyte_char_rejected() {
        let buffer = TextBuffer::new();
        buffer.set_text("café");
        // 'é' starts at byte 3 and is two bytes wide
        assert!(buffer.insert(4, "x").is_err());
        assert!(buffer.delete(3, 1).is_err());
        assert_eq!(buffer.get_text(), "café");
        buffer.delete(3, 2).unwrap();
        assert_eq!(buffer.get_text(), "caf");
    }

    #[test]
    fn test_events_follow_mutations() {
        let (buffer, events) = recording_buffer();
        buffer.set_text("abcdef");
        buffer.insert(6, "gh").unwrap();
        buffer.delete(0, 2).unwrap();

        let events = events.borrow();
        assert_eq!(
            *events,
            vec![
                EditEvent { kind: EditKind::Replace, offset: 0, len: 0 },
                EditEvent { kind: EditKind::Insert, offset: 6, len: 2 },
                EditEvent { kind: EditKind::Delete, offset: 0, len: 2 },
            ]
        );
    }

    #[test]
    fn test_replace_event_covers_prior_extent() {
        let (buffer, events) = recording_buffer();
        buffer.set_text("0123456789");
        buffer.set_text("ab");

        let events = events.borrow();
        assert_eq!(events[1].kind, EditKind::Replace);
        assert_eq!(events[1].len, 10);
    }

    #[test]
    fn test_bulk_replace_is_one_event() {
        let (buffer, events) = recording_buffer();
        let many_lines = "line\n".repeat(500);
        buffer.set_text(&many_lines);
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(buffer.get_text(), many_lines);
    }

    #[test]
    fn test_rejected_edit_emits_nothing() {
        let (buffer, events) = recording_buffer();
        buffer.set_text("abc");
        let emitted = events.borrow().len();
        assert!(buffer.insert(99, "x").is_err());
        assert_eq!(events.borrow().len(), emitted);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let buffer = TextBuffer::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let id = buffer.subscribe(move |_, _| counter.set(counter.get() + 1));

        buffer.set_text("a");
        assert_eq!(count.get(), 1);

        assert!(buffer.unsubscribe(id));
        assert!(!buffer.unsubscribe(id));
        buffer.set_text("b");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_listener_may_reenter_buffer() {
        let buffer = Rc::new(TextBuffer::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        buffer.subscribe(move |b, event| sink.borrow_mut().push((event.kind, b.get_text())));

        buffer.set_text("fresh");
        // Listener read the buffer while the notification was in flight
        assert_eq!(seen.borrow()[0], (EditKind::Replace, "fresh".to_string()));
    }

    proptest! {
        #[test]
        fn test_set_text_get_text_round_trip(s in "\\PC*") {
            let buffer = TextBuffer::new();
            buffer.set_text(&s);
            prop_assert_eq!(buffer.get_text(), s);
        }
    }
}
