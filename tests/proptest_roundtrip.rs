//! Property-based tests for the codec.
//!
//! Uses proptest to generate random message components and verify that:
//! 1. Lines built by the writer tokenize back to the same components
//! 2. The tokenizer never panics on arbitrary input
//! 3. Dispatch of in-bounds input never panics

use proptest::prelude::*;

use clirc_proto::{tokenizer, Dispatcher, LineWriter};

/// Valid sender prefix: no spaces.
fn sender_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9._!@-]{0,30}").expect("valid regex")
}

/// Command word.
fn command_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z]{1,10}").expect("valid regex")
}

/// Middle parameter: nonempty, no spaces, no leading colon.
fn middle_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9#&@!._-][a-zA-Z0-9#&@!._:-]{0,20}").expect("valid regex")
}

/// Trailing parameter: may contain spaces, must not start with a bare
/// colon or be empty (those forms are not distinguishable on the wire
/// from the colon that introduces them).
fn trailing_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9][a-zA-Z0-9 :!._-]{0,60}[a-zA-Z0-9]").expect("valid regex")
}

proptest! {
    #[test]
    fn writer_output_tokenizes_back(
        sender in prop::option::of(sender_strategy()),
        command in command_strategy(),
        middles in prop::collection::vec(middle_strategy(), 0..5),
        trailing in prop::option::of(trailing_strategy()),
    ) {
        let mut writer = LineWriter::new();
        writer.set_terminate(false);
        if let Some(ref sender) = sender {
            writer.set_sender(sender.clone());
        }
        writer.push(command.clone());
        for middle in &middles {
            writer.push(middle.clone());
        }
        if let Some(ref trailing) = trailing {
            writer.push(trailing.clone());
        }
        let line = writer.write();

        prop_assert_eq!(tokenizer::prefix(&line), sender.as_deref().unwrap_or(""));
        prop_assert_eq!(tokenizer::command(&line), command.as_str());

        let mut expected: Vec<&str> = middles.iter().map(String::as_str).collect();
        if let Some(ref trailing) = trailing {
            expected.push(trailing);
        }
        let parameters = tokenizer::parameters(&line);
        prop_assert_eq!(parameters.as_slice(), expected.as_slice());
    }

    #[test]
    fn tokenizer_never_panics(raw in "[^\r\n]{0,600}") {
        let _ = tokenizer::prefix(&raw);
        let _ = tokenizer::command(&raw);
        let _ = tokenizer::parameters(&raw);
        let _ = tokenizer::tokenize(&raw);
    }

    #[test]
    fn dispatch_never_panics(raw in "[^\r\n]{0,600}") {
        let dispatcher = Dispatcher::builder().build();
        // Ok or Err are both acceptable; only a panic is a failure.
        let _ = dispatcher.dispatch(&raw);
    }

    #[test]
    fn terminated_and_bare_lines_tokenize_identically(
        command in command_strategy(),
        middles in prop::collection::vec(middle_strategy(), 0..4),
    ) {
        let mut writer = LineWriter::new();
        writer.set_terminate(false);
        writer.push(command.clone());
        for middle in &middles {
            writer.push(middle.clone());
        }
        let bare = writer.write();
        let terminated = format!("{bare}\r\n");

        prop_assert_eq!(tokenizer::tokenize(&bare), tokenizer::tokenize(&terminated));
    }
}
