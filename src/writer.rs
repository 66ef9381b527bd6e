//! Serialization of structured messages back into raw lines.

/// A pending parameter queued on a [`LineWriter`].
#[derive(Debug, Clone)]
enum Pending {
    Value {
        text: String,
        splittable: bool,
    },
    List {
        items: Vec<String>,
        separator: String,
        splittable: bool,
    },
}

impl Pending {
    /// The final rendered form of this parameter.
    fn render(self) -> String {
        match self {
            Pending::Value { text, .. } => text,
            Pending::List {
                items, separator, ..
            } => items.join(&separator),
        }
    }

    fn splittable(&self) -> bool {
        match self {
            Pending::Value { splittable, .. } | Pending::List { splittable, .. } => *splittable,
        }
    }
}

/// Accumulates message parameters and serializes them to a raw line.
///
/// The last parameter is prefixed with `:` exactly when its final
/// rendered form contains a space; all other parameters are emitted
/// bare. [`write`](LineWriter::write) clears the accumulated sender and
/// parameters so the writer can be reused for the next message.
///
/// ```
/// use clirc_proto::LineWriter;
///
/// let mut w = LineWriter::new();
/// w.set_sender("nick!u@h");
/// w.push("PRIVMSG");
/// w.push("#chan");
/// w.push("hello there");
/// assert_eq!(w.write(), ":nick!u@h PRIVMSG #chan :hello there\r\n");
/// ```
#[derive(Debug)]
pub struct LineWriter {
    sender: Option<String>,
    pending: Vec<Pending>,
    terminate: bool,
}

impl Default for LineWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineWriter {
    /// Create a writer with the line terminator enabled.
    pub fn new() -> Self {
        Self {
            sender: None,
            pending: Vec::new(),
            terminate: true,
        }
    }

    /// Set the sender emitted as a leading `:sender `.
    pub fn set_sender(&mut self, sender: impl Into<String>) {
        self.sender = Some(sender.into());
    }

    /// Enable or disable the trailing `\r\n` terminator (default on).
    ///
    /// This is configuration, not accumulated state; it survives
    /// [`write`](LineWriter::write).
    pub fn set_terminate(&mut self, terminate: bool) {
        self.terminate = terminate;
    }

    /// Queue a single parameter.
    pub fn push(&mut self, value: impl Into<String>) {
        self.pending.push(Pending::Value {
            text: value.into(),
            splittable: false,
        });
    }

    /// Queue a single parameter marked splittable.
    ///
    /// The flag is recorded but never acted on here; it is a marker for
    /// transports that split oversized lines themselves.
    pub fn push_splittable(&mut self, value: impl Into<String>) {
        self.pending.push(Pending::Value {
            text: value.into(),
            splittable: true,
        });
    }

    /// Queue a list parameter rendered by joining `items` with `separator`.
    pub fn push_list<I, S>(&mut self, items: I, separator: impl Into<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.push(Pending::List {
            items: items.into_iter().map(Into::into).collect(),
            separator: separator.into(),
            splittable: false,
        });
    }

    /// Queue a list parameter marked splittable.
    pub fn push_list_splittable<I, S>(&mut self, items: I, separator: impl Into<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.push(Pending::List {
            items: items.into_iter().map(Into::into).collect(),
            separator: separator.into(),
            splittable: true,
        });
    }

    /// Whether any queued parameter carries the splittable marker.
    pub fn any_splittable(&self) -> bool {
        self.pending.iter().any(Pending::splittable)
    }

    /// Number of queued parameters.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Serialize the accumulated message and clear sender and parameters.
    pub fn write(&mut self) -> String {
        let mut out = String::new();
        if let Some(sender) = self.sender.take() {
            out.push(':');
            out.push_str(&sender);
            out.push(' ');
        }

        let rendered: Vec<String> = self.pending.drain(..).map(Pending::render).collect();
        if let Some((last, head)) = rendered.split_last() {
            for param in head {
                out.push_str(param);
                out.push(' ');
            }
            // The predicate runs on the final rendered string, so a
            // list whose join introduces a space gets the colon too.
            if last.contains(' ') {
                out.push(':');
            }
            out.push_str(last);
        }

        if self.terminate {
            out.push_str("\r\n");
        }
        out
    }
}
