//! The dispatch registry.
//!
//! Given a raw line, the [`Dispatcher`] classifies it by shape (custom,
//! numeric, CTCP-framed, or plain command), trials the recognizers of
//! that category in priority order, and produces a freshly parsed
//! message instance. A successful match moves its recognizer to the
//! front of its category's list, so frequently seen message types are
//! trialed first; the relative order of all other recognizers is
//! preserved. Lines no recognizer claims fall back to the generic types
//! in [`crate::generic`], without any promotion.

use std::sync::Mutex;

use tracing::{debug, trace};

use crate::ctcp::{CtcpProbe, DelimCtcpProbe};
use crate::error::DispatchError;
use crate::generic::{
    GenericCtcpReply, GenericCtcpRequest, GenericError, GenericMessage, GenericNumeric,
};
use crate::message::{Message, Recognizer};
use crate::numeric;
use crate::tokenizer;

/// Maximum valid line length in bytes, terminator excluded.
pub const MAX_LINE_LEN: usize = 512;

/// Recognizer categories, each owning one priority list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Three-digit reply codes.
    Numeric,
    /// CTCP-framed lines.
    Ctcp,
    /// Word commands.
    Command,
    /// Application-registered recognizers, always trialed first.
    Custom,
}

#[derive(Default)]
struct PriorityLists {
    custom: Vec<Recognizer>,
    numeric: Vec<Recognizer>,
    ctcp: Vec<Recognizer>,
    command: Vec<Recognizer>,
}

impl PriorityLists {
    fn list_mut(&mut self, category: Category) -> &mut Vec<Recognizer> {
        match category {
            Category::Numeric => &mut self.numeric,
            Category::Ctcp => &mut self.ctcp,
            Category::Command => &mut self.command,
            Category::Custom => &mut self.custom,
        }
    }

    fn list(&self, category: Category) -> &Vec<Recognizer> {
        match category {
            Category::Numeric => &self.numeric,
            Category::Ctcp => &self.ctcp,
            Category::Command => &self.command,
            Category::Custom => &self.custom,
        }
    }
}

/// Trial a category's recognizers in priority order; on a match, move
/// the recognizer to the front and return a fresh instance.
fn try_category(
    list: &mut [Recognizer],
    category: Category,
    line: &str,
) -> Option<Box<dyn Message>> {
    let idx = list.iter().position(|r| r.matches(line))?;
    // Move-to-front; `rotate_right` keeps the relative order of the
    // recognizers that were ahead of the match.
    list[..=idx].rotate_right(1);
    let recognizer = &list[0];
    trace!(recognizer = recognizer.name(), ?category, "recognizer matched");
    Some(recognizer.instantiate())
}

/// Builder for a [`Dispatcher`].
///
/// Recognizers are registered explicitly here; there is no runtime
/// catalog discovery. Registration order within a category is the
/// initial priority order.
pub struct DispatcherBuilder {
    lists: PriorityLists,
    ctcp_probe: Box<dyn CtcpProbe>,
}

impl DispatcherBuilder {
    /// Register `recognizer` at the back of `category`'s priority list.
    #[must_use]
    pub fn recognize(mut self, category: Category, recognizer: Recognizer) -> Self {
        self.lists.list_mut(category).push(recognizer);
        self
    }

    /// Replace the CTCP framing probe (default: [`DelimCtcpProbe`]).
    #[must_use]
    pub fn ctcp_probe(mut self, probe: impl CtcpProbe + 'static) -> Self {
        self.ctcp_probe = Box::new(probe);
        self
    }

    /// Finish building the dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            lists: Mutex::new(self.lists),
            ctcp_probe: self.ctcp_probe,
        }
    }
}

/// Classifies raw lines and instantiates the matching message type.
///
/// Owned by the embedding application; multiple independent dispatchers
/// may coexist. Shared-state access (the four priority lists) is
/// guarded by one mutex, held across match-and-promote but released
/// before the instance's `parse` step runs.
///
/// ```
/// use clirc_proto::{Category, Dispatcher, GenericMessage, Recognizer};
///
/// let dispatcher = Dispatcher::builder()
///     .recognize(Category::Command, Recognizer::for_command::<GenericMessage>("PING"))
///     .build();
///
/// let msg = dispatcher.dispatch("PING :irc.example.com").unwrap();
/// let ping = msg.as_any().downcast_ref::<GenericMessage>().unwrap();
/// assert_eq!(ping.params, ["irc.example.com"]);
/// ```
pub struct Dispatcher {
    lists: Mutex<PriorityLists>,
    ctcp_probe: Box<dyn CtcpProbe>,
}

impl Dispatcher {
    /// Start building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder {
            lists: PriorityLists::default(),
            ctcp_probe: Box::new(DelimCtcpProbe),
        }
    }

    /// Append `recognizer` to the Custom category.
    ///
    /// Custom recognizers are trialed before every other category. Safe
    /// to call while dispatches are in flight on other threads.
    pub fn register_custom(&self, recognizer: Recognizer) {
        self.lock_lists().custom.push(recognizer);
    }

    /// Number of recognizers currently registered in `category`.
    pub fn registered_count(&self, category: Category) -> usize {
        self.lock_lists().list(category).len()
    }

    /// Dispatch a raw line to a freshly parsed message instance.
    ///
    /// A trailing line terminator is tolerated and excluded from the
    /// length bound. A panic in a registered match closure is a defect
    /// in that recognizer and propagates unwrapped; errors from the
    /// winning type's `parse` step come back as
    /// [`DispatchError::Parse`].
    pub fn dispatch(&self, raw: &str) -> Result<Box<dyn Message>, DispatchError> {
        let line = raw.trim_end_matches(['\r', '\n']);
        let len = line.len();
        if len == 0 || len > MAX_LINE_LEN {
            return Err(DispatchError::Length {
                len,
                raw: raw.to_owned(),
            });
        }

        let mut instance = self.select(line);
        instance.parse(line).map_err(|cause| DispatchError::Parse {
            raw: line.to_owned(),
            cause,
        })?;
        Ok(instance)
    }

    /// Pick the recognizer (or fallback) for `line` and instantiate it.
    ///
    /// Runs entirely under the list lock so that trialing and
    /// move-to-front are atomic with respect to concurrent dispatches;
    /// the returned instance is parsed outside the lock.
    fn select(&self, line: &str) -> Box<dyn Message> {
        let mut lists = self.lock_lists();

        if let Some(instance) = try_category(&mut lists.custom, Category::Custom, line) {
            return instance;
        }

        let command = tokenizer::command(line);
        if command.as_bytes().first().is_some_and(u8::is_ascii_digit) {
            if let Some(instance) = try_category(&mut lists.numeric, Category::Numeric, line) {
                return instance;
            }
            let is_error = command
                .parse::<u16>()
                .is_ok_and(numeric::is_error);
            debug!(command, is_error, "no numeric recognizer matched, using fallback");
            return if is_error {
                Box::<GenericError>::default()
            } else {
                Box::<GenericNumeric>::default()
            };
        }

        if self.ctcp_probe.is_ctcp(line) {
            if let Some(instance) = try_category(&mut lists.ctcp, Category::Ctcp, line) {
                return instance;
            }
            let is_request = self.ctcp_probe.is_request(line);
            debug!(command, is_request, "no CTCP recognizer matched, using fallback");
            return if is_request {
                Box::<GenericCtcpRequest>::default()
            } else {
                Box::<GenericCtcpReply>::default()
            };
        }

        if let Some(instance) = try_category(&mut lists.command, Category::Command, line) {
            return instance;
        }
        debug!(command, "no command recognizer matched, using fallback");
        Box::<GenericMessage>::default()
    }

    fn lock_lists(&self) -> std::sync::MutexGuard<'_, PriorityLists> {
        match self.lists.lock() {
            Ok(guard) => guard,
            // The lists hold no invariants a panicked matcher could
            // have torn mid-update, so recover from poisoning.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lists = self.lock_lists();
        f.debug_struct("Dispatcher")
            .field("custom", &lists.custom.len())
            .field("numeric", &lists.numeric.len())
            .field("ctcp", &lists.ctcp.len())
            .field("command", &lists.command.len())
            .finish()
    }
}
