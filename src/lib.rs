//! # clirc-proto
//!
//! A client-side IRC protocol library: a raw-line codec implementing
//! the exact wire grammar, and an extensible dispatch registry that
//! turns raw lines into typed message instances.
//!
//! ## Features
//!
//! - Zero-copy tokenization of prefix, command, and parameters,
//!   including the trailing-parameter and optional-prefix quirks
//! - Classification of three-digit numeric reply codes
//! - A reusable [`LineWriter`] serializing messages back to raw lines
//! - A [`Dispatcher`] with per-category priority lists that self-tune
//!   via move-to-front caching, scaling to hundreds of message types
//! - Generic fallback messages so every in-bounds line dispatches
//!
//! ## Quick Start
//!
//! ```rust
//! use clirc_proto::{Category, Dispatcher, GenericMessage, GenericNumeric, Recognizer};
//!
//! let dispatcher = Dispatcher::builder()
//!     .recognize(Category::Command, Recognizer::for_command::<GenericMessage>("PRIVMSG"))
//!     .recognize(Category::Numeric, Recognizer::for_numeric::<GenericNumeric>(1))
//!     .build();
//!
//! let msg = dispatcher
//!     .dispatch(":irc.example.com 001 nick :Welcome to the network")
//!     .expect("valid line");
//! let welcome = msg.as_any().downcast_ref::<GenericNumeric>().unwrap();
//! assert_eq!(welcome.target(), Some("nick"));
//! ```
//!
//! Connection management, socket I/O, and message-content semantics are
//! out of scope; this crate is the codec and dispatch core a client
//! builds on.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod ctcp;
pub mod dispatch;
pub mod error;
pub mod generic;
pub mod message;
pub mod numeric;
pub mod tokenizer;
pub mod writer;

pub use self::ctcp::{CtcpProbe, DelimCtcpProbe, CTCP_DELIM};
pub use self::dispatch::{Category, Dispatcher, DispatcherBuilder, MAX_LINE_LEN};
pub use self::error::{DispatchError, MessageParseError, Result};
pub use self::generic::{
    GenericCtcpReply, GenericCtcpRequest, GenericError, GenericMessage, GenericNumeric,
};
pub use self::message::{Message, Recognizer};
pub use self::numeric::NumericClass;
pub use self::tokenizer::TokenizedLine;
pub use self::writer::LineWriter;
