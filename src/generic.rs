//! Generic fallback message types.
//!
//! The dispatcher synthesizes these when no registered recognizer
//! matches a line, so every in-bounds line still dispatches to a typed
//! instance. Applications may also register them directly via
//! [`Recognizer::for_command`](crate::Recognizer::for_command) to get a
//! structured view of commands they have no dedicated type for.

use std::any::Any;

use crate::ctcp::CTCP_DELIM;
use crate::error::MessageParseError;
use crate::message::Message;
use crate::numeric;
use crate::tokenizer;
use crate::writer::LineWriter;

/// A message holding its raw command and parameters verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericMessage {
    /// Sender prefix, possibly empty.
    pub sender: String,
    /// The command word.
    pub command: String,
    /// Parameters in wire order.
    pub params: Vec<String>,
}

impl Message for GenericMessage {
    fn parse(&mut self, raw: &str) -> Result<(), MessageParseError> {
        let line = tokenizer::tokenize(raw);
        self.sender = line.prefix.clone();
        self.command = line.command.clone();
        self.params = line.params.clone();
        Ok(())
    }

    fn format(&self, writer: &mut LineWriter) {
        if !self.sender.is_empty() {
            writer.set_sender(self.sender.clone());
        }
        writer.push(self.command.clone());
        for param in &self.params {
            writer.push(param.clone());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn parse_numeric_line(raw: &str) -> Result<(String, u16, Vec<String>), MessageParseError> {
    let line = tokenizer::tokenize(raw);
    let code = line
        .command
        .parse::<u16>()
        .ok()
        .filter(|c| numeric::is_numeric(*c))
        .ok_or_else(|| MessageParseError::InvalidNumeric(line.command.clone()))?;
    Ok((line.prefix.clone(), code, line.params.clone()))
}

fn format_numeric_line(writer: &mut LineWriter, sender: &str, code: u16, params: &[String]) {
    if !sender.is_empty() {
        writer.set_sender(sender);
    }
    writer.push(format!("{code:03}"));
    for param in params {
        writer.push(param.clone());
    }
}

/// A numeric reply with no dedicated message type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericNumeric {
    /// Sender prefix, possibly empty.
    pub sender: String,
    /// The three-digit reply code.
    pub code: u16,
    /// Parameters in wire order; the first is conventionally the target.
    pub params: Vec<String>,
}

impl GenericNumeric {
    /// The reply target (first parameter), when present.
    pub fn target(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    /// The human-readable text (last parameter), when present.
    pub fn text(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }
}

impl Message for GenericNumeric {
    fn parse(&mut self, raw: &str) -> Result<(), MessageParseError> {
        (self.sender, self.code, self.params) = parse_numeric_line(raw)?;
        Ok(())
    }

    fn format(&self, writer: &mut LineWriter) {
        format_numeric_line(writer, &self.sender, self.code, &self.params);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A numeric error reply with no dedicated message type.
///
/// Same wire shape as [`GenericNumeric`]; the dispatcher chooses this
/// type when the classifier puts the code in an error band.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericError {
    /// Sender prefix, possibly empty.
    pub sender: String,
    /// The three-digit error code.
    pub code: u16,
    /// Parameters in wire order.
    pub params: Vec<String>,
}

impl GenericError {
    /// The reply target (first parameter), when present.
    pub fn target(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    /// The error text (last parameter), when present.
    pub fn text(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }
}

impl Message for GenericError {
    fn parse(&mut self, raw: &str) -> Result<(), MessageParseError> {
        (self.sender, self.code, self.params) = parse_numeric_line(raw)?;
        Ok(())
    }

    fn format(&self, writer: &mut LineWriter) {
        format_numeric_line(writer, &self.sender, self.code, &self.params);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn parse_ctcp_line(raw: &str) -> Result<(String, String, String), MessageParseError> {
    let line = tokenizer::tokenize(raw);
    if line.params.len() < 2 {
        return Err(MessageParseError::NotEnoughArguments {
            expected: 2,
            got: line.params.len(),
        });
    }
    let body = line.params[line.params.len() - 1]
        .trim_matches(CTCP_DELIM)
        .to_owned();
    Ok((line.prefix.clone(), line.params[0].clone(), body))
}

fn format_ctcp_line(
    writer: &mut LineWriter,
    command: &str,
    sender: &str,
    target: &str,
    body: &str,
) {
    if !sender.is_empty() {
        writer.set_sender(sender);
    }
    writer.push(command);
    writer.push(target);
    writer.push(format!("{CTCP_DELIM}{body}{CTCP_DELIM}"));
}

/// A CTCP request with no dedicated message type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericCtcpRequest {
    /// Sender prefix, possibly empty.
    pub sender: String,
    /// Target nick or channel.
    pub target: String,
    /// The framed body with delimiters stripped.
    pub body: String,
}

impl Message for GenericCtcpRequest {
    fn parse(&mut self, raw: &str) -> Result<(), MessageParseError> {
        (self.sender, self.target, self.body) = parse_ctcp_line(raw)?;
        Ok(())
    }

    fn format(&self, writer: &mut LineWriter) {
        format_ctcp_line(writer, "PRIVMSG", &self.sender, &self.target, &self.body);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A CTCP reply with no dedicated message type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericCtcpReply {
    /// Sender prefix, possibly empty.
    pub sender: String,
    /// Target nick.
    pub target: String,
    /// The framed body with delimiters stripped.
    pub body: String,
}

impl Message for GenericCtcpReply {
    fn parse(&mut self, raw: &str) -> Result<(), MessageParseError> {
        (self.sender, self.target, self.body) = parse_ctcp_line(raw)?;
        Ok(())
    }

    fn format(&self, writer: &mut LineWriter) {
        format_ctcp_line(writer, "NOTICE", &self.sender, &self.target, &self.body);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
