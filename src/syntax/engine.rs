//! Highlight engine
//!
//! The engine subscribes to a [`TextBuffer`], re-derives the full span set
//! from the current text on every edit, and hands it to a host paint
//! callback together with a clear instruction. Its own paint must never be
//! observable as an edit, so a suspended flag guards the event handler for
//! the duration of each paint call.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use super::rules::{PatternRule, RuleSet};
use super::style::StyleSpan;
use crate::buffer::{SubscriptionId, TextBuffer};
use crate::error::{HiliteError, Result};

/// Host paint callback
///
/// Receives the range to reset to default styling (always the full prior
/// extent) followed by the replacement spans in application order. Must not
/// raise document mutation events; a paint that does mutate the buffer is
/// tolerated but costs one follow-up pass.
pub type PaintFn = dyn FnMut(Range<usize>, &[StyleSpan]);

/// Engine state shared with the buffer subscription
struct EngineShared {
    /// Active rule set; each pass clones the `Rc` as a fixed snapshot
    rules: RefCell<Rc<RuleSet>>,
    /// Taken out of the slot while a paint call is in flight
    paint: RefCell<Option<Box<PaintFn>>>,
    /// Set for the duration of a paint call
    suspended: Cell<bool>,
    /// An edit arrived while suspended; one more pass is owed
    dirty: Cell<bool>,
    detached: Cell<bool>,
}

impl EngineShared {
    /// Buffer edit handler
    ///
    /// Checked guards first: a detached engine ignores the event, and an
    /// event landing while paint is in flight only marks the buffer dirty
    /// so the pass loop re-runs once paint returns. Either way, no pass
    /// ever starts inside another pass.
    fn on_edit(&self, buffer: &TextBuffer) {
        if self.detached.get() {
            return;
        }
        if self.suspended.get() {
            self.dirty.set(true);
            return;
        }
        if let Err(e) = self.run_pass(buffer) {
            warn!("highlighting pass aborted: {}", e);
        }
    }

    /// Run one highlighting pass, repeating while paint left the buffer dirty
    ///
    /// Each iteration snapshots the rule set and the full text, scans, and
    /// delivers one paint call. Edits arriving during the paint are
    /// coalesced: however many there were, exactly one follow-up pass runs,
    /// and it reads the latest text.
    fn run_pass(&self, buffer: &TextBuffer) -> Result<()> {
        loop {
            let rules = self.rules.borrow().clone();
            let text = buffer.get_text();
            let spans = rules.scan(&text);

            let Some(mut paint) = self.paint.borrow_mut().take() else {
                return Err(HiliteError::PassAborted(
                    "no paint callback installed".to_string(),
                ));
            };

            self.suspended.set(true);
            self.dirty.set(false);
            paint(0..text.len(), &spans);
            self.suspended.set(false);

            if self.detached.get() {
                // Detached from inside the paint call; the callback must
                // not run again, so drop it instead of restoring it.
                return Ok(());
            }
            *self.paint.borrow_mut() = Some(paint);

            if !self.dirty.get() {
                return Ok(());
            }
        }
    }
}

struct Attachment {
    buffer: Weak<TextBuffer>,
    subscription: SubscriptionId,
}

/// Edit-driven syntax annotator over a [`TextBuffer`]
///
/// The mapping from byte ranges to style classes is a pure function of the
/// current text and the configured rules; the engine keeps no span state
/// between passes.
pub struct HighlightEngine {
    shared: Rc<EngineShared>,
    attachment: Option<Attachment>,
}

impl HighlightEngine {
    /// Create an engine with the default keyword/string/comment rules
    pub fn new() -> Self {
        Self {
            shared: Rc::new(EngineShared {
                rules: RefCell::new(Rc::new(RuleSet::default_set())),
                paint: RefCell::new(None),
                suspended: Cell::new(false),
                dirty: Cell::new(false),
                detached: Cell::new(true),
            }),
            attachment: None,
        }
    }

    /// Create an engine with a custom rule set
    pub fn with_rules(rules: Vec<PatternRule>) -> Result<Self> {
        let engine = Self::new();
        *engine.shared.rules.borrow_mut() = Rc::new(RuleSet::new(rules)?);
        Ok(engine)
    }

    /// Subscribe to a buffer and start producing passes
    ///
    /// Runs one immediate pass so content already in the buffer is styled;
    /// after that every edit event triggers a pass. Attaching while
    /// attached detaches from the previous buffer first. The engine holds
    /// the buffer weakly and never keeps it alive.
    pub fn attach(
        &mut self,
        buffer: &Rc<TextBuffer>,
        paint: impl FnMut(Range<usize>, &[StyleSpan]) + 'static,
    ) {
        self.detach();
        *self.shared.paint.borrow_mut() = Some(Box::new(paint));
        self.shared.detached.set(false);

        let shared = self.shared.clone();
        let subscription = buffer.subscribe(move |buffer, _event| shared.on_edit(buffer));
        self.attachment = Some(Attachment {
            buffer: Rc::downgrade(buffer),
            subscription,
        });

        if let Err(e) = self.shared.run_pass(buffer) {
            warn!("initial highlighting pass aborted: {}", e);
        }
    }

    /// Replace the active rule set
    ///
    /// The new rules are validated first; on error the active set is left
    /// untouched. A pass already in flight keeps the snapshot it took and
    /// the next pass picks up the replacement. Styling already on screen
    /// is not recomputed until the next pass; call [`Self::rehighlight`]
    /// to restyle immediately.
    pub fn configure(&mut self, rules: Vec<PatternRule>) -> Result<()> {
        let rules = RuleSet::new(rules)?;
        debug!("rule set replaced: {} rules", rules.len());
        *self.shared.rules.borrow_mut() = Rc::new(rules);
        Ok(())
    }

    /// Check whether the engine is currently attached to a buffer
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Run one pass on demand
    ///
    /// Fails with [`HiliteError::PassAborted`] when the engine is detached
    /// or the buffer has been dropped; prior styling stays in place.
    pub fn rehighlight(&self) -> Result<()> {
        let attachment = self
            .attachment
            .as_ref()
            .ok_or_else(|| HiliteError::PassAborted("engine is not attached".to_string()))?;
        let buffer = attachment
            .buffer
            .upgrade()
            .ok_or_else(|| HiliteError::PassAborted("buffer no longer exists".to_string()))?;
        self.shared.run_pass(&buffer)
    }

    /// Unsubscribe and stop producing passes
    ///
    /// No paint callback runs after this returns. Safe to call from inside
    /// a paint call: the in-flight pass observes the flag as soon as paint
    /// returns and stops without painting again.
    pub fn detach(&mut self) {
        self.shared.detached.set(true);
        *self.shared.paint.borrow_mut() = None;
        if let Some(attachment) = self.attachment.take() {
            if let Some(buffer) = attachment.buffer.upgrade() {
                buffer.unsubscribe(attachment.subscription);
            }
        }
    }
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HighlightEngine {
    fn drop(&mut self) {
        self.detach();
    }
}
