//! KSON decoding: text to [`Node`] tree.
//!
//! The decoder is a single forward pass over the input with no separate
//! tokenizer. It keeps a bounded stack of frames, each one the state the
//! decoder is in plus the node being built in that state:
//!
//! | State | Entered on | Left on |
//! |---|---|---|
//! | `Root` | start of input | end of input |
//! | `List` | `[` | `]` |
//! | `Hash` | `{` | `}` |
//! | `ListItem` | first byte of an item inside a list | its value, or the end of its line |
//! | `HashItem` | `name:` inside a hash | its value, or the end of its line |
//!
//! A closing frame hands its node to the frame below it: items are pushed
//! into their list or inserted into their hash, containers become the value
//! of the enclosing item (or the document root).
//!
//! ## Grammar in short
//!
//! - `[`, `]`, `{` and `}` must be the last thing on their line.
//! - A hash entry is `name:` followed by a literal or an opening delimiter on
//!   the same line. `name:` alone is an empty literal.
//! - A literal is the rest of the line, trimmed, or a `"…"` / `` `…` ``
//!   quoted run of bytes that may span lines. Nothing but whitespace may
//!   follow the closing quote.
//!
//! ```rust
//! use kson::{decode_str, Node};
//!
//! let node = decode_str("[\n  one\n  \"two \"\n  [\n    three\n  ]\n]\n").unwrap();
//! let items = node.as_list().unwrap();
//! assert_eq!(items[0], Node::from("one"));
//! assert_eq!(items[1], Node::from("two "));
//! assert_eq!(items[2].strings().unwrap(), vec!["three"]);
//! ```

use crate::scanner::Scanner;
use crate::{Error, KsonOptions, Node, NodeMap, Result};
use tracing::{debug, trace};

/// Initial capacity of freshly opened lists and hashes.
const CONTAINER_CAPACITY: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Root,
    List,
    Hash,
    ListItem,
    HashItem,
}

impl State {
    const fn name(self) -> &'static str {
        match self {
            State::Root => "document",
            State::List => "list",
            State::Hash => "hash",
            State::ListItem => "list item",
            State::HashItem => "hash item",
        }
    }

    const fn is_item(self) -> bool {
        matches!(self, State::ListItem | State::HashItem)
    }
}

struct Frame<'a> {
    state: State,
    name: &'a str,
    node: Node,
}

/// Decodes KSON text into a [`Node`] tree.
///
/// A `Decoder` is cheap to build and holds no state between calls; each
/// [`Decoder::decode`] works on its own input and stack.
///
/// # Examples
///
/// ```rust
/// use kson::{Decoder, KsonOptions};
///
/// let decoder = Decoder::new(KsonOptions::new().with_max_depth(4));
/// assert!(decoder.decode(b"{\n a: 1\n}\n").is_ok());
/// assert!(decoder.decode(b"{\n a: {\n b: 1\n }\n}\n").unwrap_err().is_format());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    options: KsonOptions,
}

impl Decoder {
    pub fn new(options: KsonOptions) -> Self {
        Decoder { options }
    }

    /// Decodes a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for invalid UTF-8 and for any malformed
    /// document; no partial tree is returned.
    pub fn decode(&self, input: &[u8]) -> Result<Node> {
        let text = std::str::from_utf8(input).map_err(|e| {
            Error::format(input, e.valid_up_to(), "input is not valid UTF-8")
        })?;
        self.decode_str(text)
    }

    /// Decodes a complete document from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for any malformed document.
    pub fn decode_str(&self, input: &str) -> Result<Node> {
        let node = Parser::new(input, self.options.max_depth).run()?;
        debug!(bytes = input.len(), kind = %node.kind(), "decoded kson document");
        Ok(node)
    }
}

fn format_error(text: &str, offset: usize, msg: &str) -> Error {
    Error::format(text.as_bytes(), offset, msg)
}

struct Parser<'a> {
    text: &'a str,
    scanner: Scanner<'a>,
    frames: Vec<Frame<'a>>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        let mut frames = Vec::with_capacity(max_depth);
        frames.push(Frame {
            state: State::Root,
            name: "",
            node: Node::Empty,
        });
        Parser {
            text,
            scanner: Scanner::new(text.as_bytes()),
            frames,
            max_depth,
        }
    }

    fn error(&self, offset: usize, msg: &str) -> Error {
        format_error(self.text, offset, msg)
    }

    fn state(&self) -> State {
        self.frames.last().map_or(State::Root, |f| f.state)
    }

    fn slice(&self, start: usize, end: usize) -> Result<&'a str> {
        self.text
            .get(start..end)
            .ok_or_else(|| self.error(start, "literal is not on a character boundary"))
    }

    fn enter(&mut self, state: State, name: &'a str, at: usize) -> Result<()> {
        if self.frames.len() >= self.max_depth {
            return Err(self.error(at, "nesting is too deep"));
        }
        let node = match state {
            State::List => Node::List(Vec::with_capacity(CONTAINER_CAPACITY)),
            State::Hash => Node::Hash(NodeMap::with_capacity(CONTAINER_CAPACITY)),
            _ => Node::Empty,
        };
        trace!(state = state.name(), depth = self.frames.len(), "enter");
        self.frames.push(Frame { state, name, node });
        Ok(())
    }

    fn exit(&mut self, state: State, at: usize) -> Result<()> {
        let current = self.state();
        if current != state || self.frames.len() < 2 {
            let msg = format!("unexpected end of {} inside {}", state.name(), current.name());
            return Err(self.error(at, &msg));
        }
        let text = self.text;
        let Some(mut frame) = self.frames.pop() else {
            return Err(format_error(text, at, "decoder stack is empty"));
        };
        trace!(state = state.name(), depth = self.frames.len(), "exit");

        if state.is_item() && frame.node.is_empty() {
            frame.node = Node::Literal(String::new());
        }

        let Some(parent) = self.frames.last_mut() else {
            return Err(format_error(text, at, "decoder stack is empty"));
        };
        match (&mut parent.node, parent.state, state) {
            (Node::List(items), State::List, State::ListItem) => items.push(frame.node),
            (Node::Hash(map), State::Hash, State::HashItem) => {
                map.insert(frame.name.to_string(), frame.node);
            }
            (slot, State::Root | State::ListItem | State::HashItem, _) => {
                if !slot.is_empty() {
                    return Err(format_error(text, at, "multiple top-level values"));
                }
                *slot = frame.node;
            }
            _ => return Err(format_error(text, at, "container closed in an invalid position")),
        }
        Ok(())
    }

    fn assign_literal(&mut self, value: &'a str, at: usize) -> Result<()> {
        let state = self.state();
        let text = self.text;
        let Some(frame) = self.frames.last_mut() else {
            return Err(format_error(text, at, "decoder stack is empty"));
        };
        if !frame.node.is_empty() {
            return Err(format_error(text, at, "multiple top-level values"));
        }
        frame.node = Node::Literal(value.to_string());
        if state.is_item() {
            self.exit(state, at)?;
        }
        Ok(())
    }

    fn run(mut self) -> Result<Node> {
        if self.text.is_empty() {
            return Err(self.error(0, "document is empty"));
        }

        loop {
            let off = self.scanner.offset();
            let c = self.scanner.read_byte();

            if matches!(c, None | Some(b'\n')) && self.state().is_item() {
                self.exit(self.state(), off)?;
            }

            let Some(c) = c else { break };
            if c.is_ascii_whitespace() {
                continue;
            }

            let state = self.state();
            if state == State::Hash && c != b'}' {
                let colon = if c == b':' {
                    Some(off)
                } else {
                    self.scanner.read_until_on_line(b':')
                };
                let Some(colon) = colon else {
                    return Err(self.error(off, "hash entry is missing ':'"));
                };
                let name = self.slice(off, colon)?.trim();
                if name.is_empty() {
                    return Err(self.error(off, "hash entry has an empty name"));
                }
                self.enter(State::HashItem, name, off)?;
                continue;
            } else if state == State::List && c != b']' {
                self.enter(State::ListItem, "", off)?;
            }

            match c {
                b'[' | b']' | b'{' | b'}' => {
                    if !self.scanner.rest_of_line_blank() {
                        let msg = format!("'{}' must end its line", c as char);
                        return Err(self.error(off, &msg));
                    }
                    match c {
                        b'[' => self.enter(State::List, "", off)?,
                        b']' => self.exit(State::List, off)?,
                        b'{' => self.enter(State::Hash, "", off)?,
                        _ => self.exit(State::Hash, off)?,
                    }
                }
                b'`' | b'"' => {
                    let Some(end) = self.scanner.read_until(c) else {
                        return Err(self.error(off, "unterminated quoted literal"));
                    };
                    if !self.scanner.rest_of_line_blank() {
                        return Err(self.error(end + 1, "closing quote must end its line"));
                    }
                    let value = self.slice(off + 1, end)?;
                    self.assign_literal(value, off)?;
                }
                _ => {
                    let end = self.scanner.read_line();
                    let value = self.slice(off, end)?.trim();
                    self.assign_literal(value, off)?;
                }
            }
        }

        if self.frames.len() > 1 {
            let msg = format!("unterminated {}", self.state().name());
            return Err(self.error(self.text.len(), &msg));
        }
        match self.frames.pop() {
            Some(Frame { node, .. }) if !node.is_empty() => Ok(node),
            _ => Err(self.error(0, "document is empty")),
        }
    }
}

/// Decodes KSON bytes with default options.
///
/// # Errors
///
/// Returns [`Error::Format`] for malformed input.
pub fn decode(input: &[u8]) -> Result<Node> {
    Decoder::default().decode(input)
}

/// Decodes a KSON string with default options.
///
/// # Errors
///
/// Returns [`Error::Format`] for malformed input.
pub fn decode_str(input: &str) -> Result<Node> {
    Decoder::default().decode_str(input)
}

/// Decodes KSON bytes with custom options.
///
/// # Errors
///
/// Returns [`Error::Format`] for malformed input.
pub fn decode_with_options(input: &[u8], options: KsonOptions) -> Result<Node> {
    Decoder::new(options).decode(input)
}
