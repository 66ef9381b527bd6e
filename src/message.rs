//! The message capability surface and recognizer descriptors.
//!
//! Every concrete message type, inside this crate or registered by an
//! application, implements [`Message`]. A [`Recognizer`] pairs a
//! stateless match closure with a factory producing fresh instances;
//! the dispatcher keeps recognizers in per-category priority lists and
//! never holds a live message instance for matching.

use std::any::Any;
use std::fmt;

use crate::error::MessageParseError;
use crate::tokenizer;
use crate::writer::LineWriter;

/// A structured protocol message.
///
/// `parse` populates the instance from a raw line; `format` queues the
/// instance's wire form on a [`LineWriter`]. The `as_any` accessors let
/// consumers downcast a dispatched `Box<dyn Message>` to the concrete
/// type a recognizer produced.
pub trait Message: Any + fmt::Debug + Send {
    /// Populate this instance from a raw line.
    fn parse(&mut self, raw: &str) -> Result<(), MessageParseError>;

    /// Queue this instance's wire form on `writer`.
    fn format(&self, writer: &mut LineWriter);

    /// Upcast for downcasting to the concrete message type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete message type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

type MatchFn = Box<dyn Fn(&str) -> bool + Send + Sync>;
type FactoryFn = Box<dyn Fn() -> Box<dyn Message> + Send + Sync>;

/// A registered message type: a match predicate plus an instance factory.
///
/// The match closure must be cheap and must not panic; a panic here is
/// treated as a defect in the recognizer and propagates out of
/// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) unwrapped.
pub struct Recognizer {
    name: String,
    matcher: MatchFn,
    factory: FactoryFn,
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer").field("name", &self.name).finish()
    }
}

impl Recognizer {
    /// Create a recognizer from a match closure and a factory.
    pub fn new(
        name: impl Into<String>,
        matcher: impl Fn(&str) -> bool + Send + Sync + 'static,
        factory: impl Fn() -> Box<dyn Message> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: Box::new(matcher),
            factory: Box::new(factory),
        }
    }

    /// Recognizer for a word command, matched case-insensitively.
    ///
    /// ```
    /// use clirc_proto::{GenericMessage, Recognizer};
    ///
    /// let ping = Recognizer::for_command::<GenericMessage>("PING");
    /// ```
    pub fn for_command<M: Message + Default>(command: &'static str) -> Self {
        Self::new(
            command,
            move |raw| tokenizer::command(raw).eq_ignore_ascii_case(command),
            || Box::<M>::default(),
        )
    }

    /// Recognizer for a numeric reply code.
    pub fn for_numeric<M: Message + Default>(code: u16) -> Self {
        Self::new(
            format!("{code:03}"),
            move |raw| tokenizer::command(raw).parse::<u16>() == Ok(code),
            || Box::<M>::default(),
        )
    }

    /// The recognizer's display name, used in logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn matches(&self, raw: &str) -> bool {
        (self.matcher)(raw)
    }

    pub(crate) fn instantiate(&self) -> Box<dyn Message> {
        (self.factory)()
    }
}
