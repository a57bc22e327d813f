use memchr::memchr;
use smallvec::SmallVec;

use crate::constants::{QUOTE, TERMINATOR};
use crate::decode::scanner::Scanner;
use crate::decode::token::{self, Token};
use crate::decode::tree::{Content, NodeId, NodeKind, Tree};
use crate::error::Error;
use crate::options::DecodeOptions;
use crate::value::{RecoveryNote, Resync};
use crate::Result;

/// What one pass over the input produced: the node tree, the root (absent
/// only for empty input), and every non-fatal condition met on the way.
pub(crate) struct Outcome {
    pub tree: Tree,
    pub root: Option<NodeId>,
    pub truncated: bool,
    pub notes: Vec<RecoveryNote>,
}

pub(crate) fn build(input: &str, options: &DecodeOptions) -> Result<Outcome> {
    Builder {
        sc: Scanner::new(input),
        options: options.clone(),
        tree: Tree::new(),
        open: SmallVec::new(),
        root: None,
        notes: Vec::new(),
        truncated: false,
    }
    .run()
}

/// Iterative structure builder. One loop pass handles one structural
/// element; nesting depth lives entirely in the `open` stack, never on
/// the call stack.
struct Builder {
    sc: Scanner,
    options: DecodeOptions,
    tree: Tree,
    /// Arrays still waiting for their closing brace, innermost last.
    open: SmallVec<[NodeId; 8]>,
    root: Option<NodeId>,
    notes: Vec<RecoveryNote>,
    truncated: bool,
}

impl Builder {
    fn run(mut self) -> Result<Outcome> {
        loop {
            self.sc.clear_tape();
            let offset = self.sc.pos();
            let Some(ch) = self.sc.read_char() else {
                if !self.open.is_empty() {
                    self.truncated = true;
                }
                break;
            };
            match token::classify_tag(ch, offset)? {
                Token::Close => {
                    if self.root.is_none() {
                        return Err(Error::RootNotArray);
                    }
                    self.open.pop();
                    if self.open.is_empty() {
                        // Root closed; anything after it is ignored.
                        break;
                    }
                }
                Token::Open(kind) => {
                    if self.root.is_none() && kind != NodeKind::Array {
                        return Err(Error::RootNotArray);
                    }
                    let keep_going = match kind {
                        NodeKind::Array => self.open_array(),
                        NodeKind::Str => self.string_leaf(offset),
                        NodeKind::Int => self.int_leaf(offset),
                    };
                    if !keep_going {
                        break;
                    }
                }
            }
        }
        Ok(Outcome {
            tree: self.tree,
            root: self.root,
            truncated: self.truncated,
            notes: self.notes,
        })
    }

    /// Opens a new array and makes it the insertion target. The declared
    /// entry count is recorded but never enforced; matching braces decide
    /// when the array closes.
    fn open_array(&mut self) -> bool {
        let parent = self.open.last().copied();
        let id = self.tree.alloc(NodeKind::Array, parent);
        if parent.is_none() {
            self.root = Some(id);
        }
        self.open.push(id);
        let Some(declared) = token::read_declared_len(&mut self.sc) else {
            self.truncated = true;
            return false;
        };
        self.tree.node_mut(id).declared_len = Some(declared);
        // Skip the opening brace.
        if self.sc.read_char().is_none() {
            self.truncated = true;
            return false;
        }
        self.tree.node_mut(id).raw = self.sc.take_tape();
        true
    }

    /// Reads a string leaf: declared-length characters of raw content,
    /// then the `";` terminator. Embedded quotes and semicolons inside
    /// the declared extent are content, never terminators. When the
    /// terminator is not where the length said, falls into recovery.
    fn string_leaf(&mut self, offset: usize) -> bool {
        let parent = self.open.last().copied();
        let id = self.tree.alloc(NodeKind::Str, parent);
        let Some(declared) = token::read_declared_len(&mut self.sc) else {
            self.seal(id, Content::Text(String::new()));
            self.truncated = true;
            return false;
        };
        self.tree.node_mut(id).declared_len = Some(declared);
        // Skip the opening quote.
        if self.sc.read_char().is_none() {
            self.seal(id, Content::Text(String::new()));
            self.truncated = true;
            return false;
        }
        let content = self.sc.read_forward(declared);
        if content.chars().count() < declared {
            // The blob was cut inside the content.
            self.seal(id, Content::Text(content));
            self.truncated = true;
            return false;
        }
        if self.sc.peek(2).as_deref() == Some("\";") {
            self.sc.read_forward(2);
            self.seal(id, Content::Text(content));
            return true;
        }
        self.recover(id, offset, declared, content)
    }

    /// Length/terminator desynchronization. Tries, in order:
    ///
    /// 1. a forward scan, at most `resync_window` characters past the
    ///    declared extent, for a `";` that the length undersold — the
    ///    extra characters are kept as content;
    /// 2. a backward scan of the already-read content for a `";` that
    ///    the length oversold — the cursor rewinds to just past the real
    ///    terminator so the following elements still decode, and the
    ///    leaf becomes an anomaly placeholder;
    /// 3. giving up on this leaf: anomaly placeholder, resume right
    ///    after the position where the terminator should have been.
    ///
    /// None of these abort the parse.
    fn recover(&mut self, id: NodeId, offset: usize, declared: usize, mut content: String) -> bool {
        let window = self.options.resync_window;
        for extra in 0..=window {
            if self.sc.peek_at(extra) == Some(QUOTE) && self.sc.peek_at(extra + 1) == Some(TERMINATOR)
            {
                let tail = self.sc.read_forward(extra);
                content.push_str(&tail);
                self.sc.read_forward(2);
                self.push_note(offset, Resync::Forward { extra });
                self.seal(id, Content::Text(content));
                return true;
            }
        }
        if let Some(cut) = first_terminator(&content) {
            let overshoot = declared - (cut + 2);
            self.sc.rewind(overshoot);
            self.push_note(offset, Resync::Backward { overshoot });
            self.seal(id, Content::Anomaly(content));
            return true;
        }
        if self.sc.remaining() < 2 {
            // The cut fell on the terminator itself; the content is intact.
            self.seal(id, Content::Text(content));
            self.truncated = true;
            return false;
        }
        self.sc.read_forward(2);
        self.push_note(offset, Resync::Unresolved);
        self.seal(id, Content::Anomaly(content));
        true
    }

    /// Reads an integer leaf. A literal that does not parse as a signed
    /// integer (overflow, interior garbage) degrades to an anomaly
    /// placeholder instead of aborting, same as string recovery.
    fn int_leaf(&mut self, offset: usize) -> bool {
        let parent = self.open.last().copied();
        let id = self.tree.alloc(NodeKind::Int, parent);
        let (literal, terminated) = token::read_int_literal(&mut self.sc);
        match literal.parse::<i64>() {
            Ok(value) => self.seal(id, Content::Int(value)),
            Err(_) => {
                self.push_note(offset, Resync::Unresolved);
                self.seal(id, Content::Anomaly(literal));
            }
        }
        if !terminated {
            self.truncated = true;
            return false;
        }
        true
    }

    fn seal(&mut self, id: NodeId, content: Content) {
        let node = self.tree.node_mut(id);
        node.content = content;
        node.raw = self.sc.take_tape();
    }

    fn push_note(&mut self, offset: usize, resync: Resync) {
        let raw = self
            .options
            .keep_raw
            .then(|| self.sc.tape().to_string());
        self.notes.push(RecoveryNote { offset, resync, raw });
    }
}

/// Character index of the first `"` that begins a `";` pair in `content`,
/// or `None`. Both characters are ASCII, so the byte scan is sound on
/// multi-byte content.
fn first_terminator(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut at = 0;
    while let Some(found) = memchr(b'"', &bytes[at..]) {
        let quote = at + found;
        if bytes.get(quote + 1) == Some(&b';') {
            return Some(content[..quote].chars().count());
        }
        at = quote + 1;
    }
    None
}
