//! The incremental XML tokenizer.
//!
//! Overview
//! - [`Parser::feed`] consumes one chunk of the document and drives the
//!   observer. The chunk may end anywhere: in a name, inside an attribute
//!   value, in the middle of `-->`. Whatever state is needed to resume lives
//!   in the parser, and the next `feed` call continues exactly there.
//! - The automaton is an explicit [`State`] tag; `feed` loops over a `match`
//!   on it. Each handler either finishes its token and moves to another
//!   state, or runs out of input and leaves the state unchanged. Re-entering
//!   a handler after a suspension is always safe.
//!
//! Storage
//! - Names and attribute values accumulate in a single [`TokenBuffer`]. Only
//!   one of them is in flight at any instant: each is reported before the
//!   next one starts.
//! - Open element names are copied into the [`NameStack`] so closing tags can
//!   be checked after the opening tag's chunk is gone.
//! - Text and comment payloads are never copied. They are reported as slices
//!   of the chunk being fed, split at chunk boundaries, with a `partial` flag.
//!
//! Errors
//! - Every error stops at the offending byte and asks the observer what to
//!   do. A `true` answer applies the repair documented on [`ErrorKind`]; a
//!   `false` answer halts the parser until [`Parser::reset`].

use core::mem;

use crate::{
    cursor::Cursor,
    error::{ErrorKind, ParseError},
    name_stack::NameStack,
    observer::{Context, Observer},
    options::ParserOptions,
    scanner::{Input, Scan},
    token_buffer::TokenBuffer,
};

/// A run of dashes to report comment dashes that were held back at the end
/// of an earlier chunk.
static DASHES: [u8; 32] = [b'-'; 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between tokens: skipping whitespace, deciding between a tag and text.
    Idle,
    /// After `<`.
    TagDispatch,
    /// After `<!`.
    Markup,
    /// After `<!-`.
    CommentOpen,
    ElementName,
    /// Inside an opening tag, between attributes.
    AttributeScan,
    AttributeName,
    /// After an attribute name; `=` is optional.
    ExpectEquals,
    /// After `=`.
    ExpectQuote,
    AttributeValue,
    Text,
    Comment,
    ProcessingInstruction,
    DoctypeSkip,
    ClosingTagName,
    /// After the `/` of `<a/>`.
    SelfClose,
}

/// An incremental XML tokenizer reporting to an [`Observer`].
///
/// One parser handles one document at a time. Feed it the document in
/// consecutive chunks; call [`finish`](Self::finish) after the last one and
/// [`reset`](Self::reset) to start another document.
///
/// ```rust
/// use xmlmodem::{Counter, Parser, ParserOptions};
///
/// let mut parser = Parser::new(Counter::default(), ParserOptions::default());
/// for chunk in [&b"<list><item id=\"1\"/><it"[..], b"em id=\"2\"/></list>"] {
///     parser.feed(chunk)?;
/// }
/// parser.finish()?;
/// assert_eq!(parser.observer().elements, 3);
/// assert_eq!(parser.observer().attributes, 2);
/// # Ok::<(), xmlmodem::ParseError>(())
/// ```
#[derive(Debug)]
pub struct Parser<O> {
    observer: O,
    options: ParserOptions,
    cursor: Cursor,
    state: State,
    error: Option<ErrorKind>,

    token: TokenBuffer,
    stack: NameStack,
    /// Open elements admitted by recovery after the name stack was full.
    overflow: usize,

    /// The closing tag's name is complete; waiting for `>`.
    item_complete: bool,
    /// The token in flight hit its limit; its remaining bytes are dropped.
    truncated: bool,
    pending_quote: u8,
    /// Length of the current run of `-` inside a comment.
    dashes: usize,
    /// Dashes of that run that belong to earlier chunks and were not
    /// reported yet.
    held_dashes: usize,
    /// The previous byte of a processing instruction was `?`.
    question: bool,
    /// `<`/`>` balance inside a DOCTYPE.
    brackets: usize,
    /// A text span was partially reported and is still open.
    in_text: bool,
}

impl<O: Observer> Parser<O> {
    /// Creates a parser reporting to `observer`.
    ///
    /// The token buffer and name stack are allocated here, sized from
    /// `options`; parsing itself never allocates.
    pub fn new(observer: O, options: ParserOptions) -> Self {
        Self {
            observer,
            options,
            cursor: Cursor::default(),
            state: State::Idle,
            error: None,
            token: TokenBuffer::new(options.token_capacity()),
            stack: NameStack::new(options.max_stack_size, options.max_name_length),
            overflow: 0,
            item_complete: false,
            truncated: false,
            pending_quote: 0,
            dashes: 0,
            held_dashes: 0,
            question: false,
            brackets: 0,
            in_text: false,
        }
    }

    /// Consumes the next chunk of the document.
    ///
    /// Chunks must be consecutive pieces of one document; each byte is parsed
    /// once. Events are delivered to the observer while the chunk is
    /// consumed.
    ///
    /// # Errors
    ///
    /// Returns the error that halted the parser, either during this call or
    /// an earlier one. A halted parser ignores further input until
    /// [`reset`](Self::reset).
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), ParseError> {
        if let Some(kind) = self.error {
            return Err(self.cursor.error(kind));
        }

        let mut input = Input::new(chunk, self.cursor);
        while !input.is_empty() && self.error.is_none() {
            match self.state {
                State::Idle => self.idle(&mut input),
                State::TagDispatch => self.tag_dispatch(&mut input),
                State::Markup => self.markup(&mut input),
                State::CommentOpen => self.comment_open(&mut input),
                State::ElementName => self.element_name(&mut input),
                State::AttributeScan => self.attribute_scan(&mut input),
                State::AttributeName => self.attribute_name(&mut input),
                State::ExpectEquals => self.expect_equals(&mut input),
                State::ExpectQuote => self.expect_quote(&mut input),
                State::AttributeValue => self.attribute_value(&mut input),
                State::Text => self.text(&mut input),
                State::Comment => self.comment(&mut input),
                State::ProcessingInstruction => self.processing_instruction(&mut input),
                State::DoctypeSkip => self.doctype_skip(&mut input),
                State::ClosingTagName => self.closing_tag_name(&mut input),
                State::SelfClose => self.self_close(&mut input),
            }
        }
        self.cursor = input.finish();

        match self.error {
            Some(kind) => Err(self.cursor.error(kind)),
            None => Ok(()),
        }
    }

    /// Signals the end of the document.
    ///
    /// A text span left open by the last chunk is closed with an empty final
    /// [`on_data`](Observer::on_data) slice.
    ///
    /// # Errors
    ///
    /// Returns the error that halted the parser, if any. Otherwise, ending
    /// inside a comment reports [`ErrorKind::UnterminatedComment`], and ending
    /// with open elements or inside a tag reports
    /// [`ErrorKind::UnexpectedEndOfInput`]. Both are passed to
    /// [`Observer::on_error`] first; a `false` answer leaves the parser
    /// halted.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        if let Some(kind) = self.error {
            return Err(self.cursor.error(kind));
        }

        if self.in_text {
            let cx = Context::new(&self.cursor, &self.stack, self.error);
            self.observer.on_data(&cx, &[], false);
            self.in_text = false;
            self.state = State::Idle;
        }

        let kind = match self.state {
            State::Idle if self.stack.is_empty() && self.overflow == 0 => return Ok(()),
            State::Comment => ErrorKind::UnterminatedComment,
            _ => ErrorKind::UnexpectedEndOfInput,
        };
        let cursor = self.cursor;
        self.raise(&cursor, kind);
        Err(cursor.error(kind))
    }

    /// Prepares the parser for a new document.
    ///
    /// Position, automaton state, error and name stack go back to their
    /// initial values. The storage is kept.
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
        self.state = State::Idle;
        self.error = None;
        self.token.clear();
        self.stack.clear();
        self.overflow = 0;
        self.item_complete = false;
        self.truncated = false;
        self.pending_quote = 0;
        self.dashes = 0;
        self.held_dashes = 0;
        self.question = false;
        self.brackets = 0;
        self.in_text = false;
        trace!("parser reset");
    }

    /// 1-based line of the start of the most recent token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.cursor.line()
    }

    /// 1-based column, in bytes, of the start of the most recent token.
    #[must_use]
    pub fn column(&self) -> usize {
        self.cursor.column()
    }

    /// The error that halted the parser, if any.
    #[must_use]
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Number of open elements recorded on the name stack.
    #[must_use]
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// Name of the open element at `index`, the root being at index 0.
    #[must_use]
    pub fn stack_value(&self, index: usize) -> Option<&[u8]> {
        self.stack.get(index)
    }

    /// The same view the observer receives in its callbacks.
    #[must_use]
    pub fn context(&self) -> Context<'_> {
        Context::new(&self.cursor, &self.stack, self.error)
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The current observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The current observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Replaces the observer and returns the previous one.
    pub fn set_observer(&mut self, observer: O) -> O {
        mem::replace(&mut self.observer, observer)
    }

    /// Consumes the parser, returning the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    /// Reports `kind` to the observer and returns its decision.
    ///
    /// The error stays recorded, halting `feed`, unless the observer chose to
    /// continue.
    fn raise(&mut self, cursor: &Cursor, kind: ErrorKind) -> bool {
        self.error = Some(kind);
        let cx = Context::new(cursor, &self.stack, self.error);
        let proceed = self
            .observer
            .on_error(&cx, self.options.try_continue_on_error);
        trace!(
            error = ?kind,
            line = cursor.line(),
            column = cursor.column(),
            proceed,
            "parse error"
        );
        if proceed {
            self.error = None;
        }
        proceed
    }

    /// Reports [`ErrorKind::UnexpectedChar`] at the next byte and skips it if
    /// the observer allows.
    fn unexpected(&mut self, input: &mut Input<'_>) -> bool {
        input.mark();
        if self.raise(&input.cursor, ErrorKind::UnexpectedChar) {
            input.bump();
            true
        } else {
            false
        }
    }

    fn begin_token(&mut self) {
        self.token.clear();
        self.item_complete = false;
        self.truncated = false;
    }

    // --------------------------------------------------------------------------------------------
    // State handlers
    // --------------------------------------------------------------------------------------------

    fn idle(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.skip_whitespace() else {
            return;
        };
        input.mark();
        if byte == b'<' {
            input.bump();
            self.state = State::TagDispatch;
        } else {
            self.state = State::Text;
        }
    }

    fn tag_dispatch(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.peek() else {
            return;
        };
        match byte {
            b'/' => {
                input.bump();
                self.begin_token();
                self.state = State::ClosingTagName;
            }
            b'?' => {
                input.bump();
                self.question = false;
                self.state = State::ProcessingInstruction;
            }
            b'!' => {
                input.bump();
                self.state = State::Markup;
            }
            b if b.is_ascii_alphabetic() => {
                self.begin_token();
                input.mark();
                self.state = State::ElementName;
            }
            _ => {
                self.unexpected(input);
            }
        }
    }

    fn markup(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.peek() else {
            return;
        };
        if byte == b'-' {
            input.bump();
            self.state = State::CommentOpen;
        } else {
            self.brackets = 1;
            self.state = State::DoctypeSkip;
        }
    }

    fn comment_open(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.peek() else {
            return;
        };
        if byte == b'-' {
            input.bump();
            self.dashes = 0;
            self.held_dashes = 0;
            self.state = State::Comment;
        } else if self.unexpected(input) {
            // Not a comment after all; skip the declaration like a DOCTYPE.
            self.brackets = 1;
            self.state = State::DoctypeSkip;
        }
    }

    fn element_name(&mut self, input: &mut Input<'_>) {
        match input.scan_identifier(
            &mut self.token,
            self.options.max_name_length,
            self.truncated,
        ) {
            Scan::NeedMoreData => {}
            Scan::LimitExceeded => {
                if self.raise(&input.cursor, ErrorKind::MaxElementNameLengthExceeded) {
                    self.truncated = true;
                }
            }
            Scan::Ok => self.open_element(input),
        }
    }

    fn open_element(&mut self, input: &mut Input<'_>) {
        if self.stack.push(self.token.as_bytes()).is_err() {
            if !self.raise(&input.cursor, ErrorKind::MaxNestingDepthExceeded) {
                return;
            }
            self.overflow += 1;
        }

        let cx = Context::new(&input.cursor, &self.stack, self.error);
        self.observer.on_element_begin(&cx, self.token.as_bytes());
        self.token.clear();
        self.state = State::AttributeScan;
    }

    fn attribute_scan(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.skip_whitespace() else {
            return;
        };
        match byte {
            b'>' => {
                input.bump();
                self.state = State::Idle;
            }
            b'/' => {
                input.bump();
                self.state = State::SelfClose;
            }
            b if b.is_ascii_alphabetic() => {
                self.begin_token();
                input.mark();
                self.state = State::AttributeName;
            }
            _ => {
                self.unexpected(input);
            }
        }
    }

    fn attribute_name(&mut self, input: &mut Input<'_>) {
        match input.scan_identifier(
            &mut self.token,
            self.options.max_name_length,
            self.truncated,
        ) {
            Scan::NeedMoreData => {}
            Scan::LimitExceeded => {
                if self.raise(&input.cursor, ErrorKind::MaxAttrNameLengthExceeded) {
                    self.truncated = true;
                }
            }
            Scan::Ok => {
                let cx = Context::new(&input.cursor, &self.stack, self.error);
                self.observer.on_attribute(&cx, self.token.as_bytes());
                self.token.clear();
                self.state = State::ExpectEquals;
            }
        }
    }

    fn expect_equals(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.skip_whitespace() else {
            return;
        };
        if byte == b'=' {
            input.bump();
            self.state = State::ExpectQuote;
        } else {
            // An attribute without a value.
            self.state = State::AttributeScan;
        }
    }

    fn expect_quote(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.skip_whitespace() else {
            return;
        };
        if byte == b'"' || byte == b'\'' {
            self.pending_quote = byte;
            input.bump();
            self.begin_token();
            input.mark();
            self.state = State::AttributeValue;
        } else {
            self.unexpected(input);
        }
    }

    fn attribute_value(&mut self, input: &mut Input<'_>) {
        match input.scan_value(
            &mut self.token,
            self.options.max_value_length,
            self.pending_quote,
            self.truncated,
        ) {
            Scan::NeedMoreData => {}
            Scan::LimitExceeded => {
                if self.raise(&input.cursor, ErrorKind::MaxAttrValueLengthExceeded) {
                    self.truncated = true;
                }
            }
            Scan::Ok => {
                input.bump();
                let cx = Context::new(&input.cursor, &self.stack, self.error);
                self.observer
                    .on_attribute_value(&cx, self.token.as_bytes(), false);
                self.token.clear();
                self.pending_quote = 0;
                self.truncated = false;
                self.state = State::AttributeScan;
            }
        }
    }

    fn self_close(&mut self, input: &mut Input<'_>) {
        let Some(byte) = input.peek() else {
            return;
        };
        if byte != b'>' {
            self.unexpected(input);
            return;
        }
        input.bump();

        if self.overflow > 0 {
            self.overflow -= 1;
        } else {
            self.stack.pop();
        }
        let cx = Context::new(&input.cursor, &self.stack, self.error);
        self.observer.on_element_end(&cx, None);
        self.state = State::Idle;
    }

    fn closing_tag_name(&mut self, input: &mut Input<'_>) {
        if !self.item_complete {
            if self.token.is_empty() && !self.truncated {
                let Some(byte) = input.peek() else {
                    return;
                };
                if !byte.is_ascii_alphabetic() {
                    self.unexpected(input);
                    return;
                }
                input.mark();
            }

            match input.scan_identifier(
                &mut self.token,
                self.options.max_name_length,
                self.truncated,
            ) {
                Scan::NeedMoreData => return,
                Scan::LimitExceeded => {
                    if self.raise(&input.cursor, ErrorKind::MaxElementNameLengthExceeded) {
                        self.truncated = true;
                    }
                    return;
                }
                Scan::Ok => self.item_complete = true,
            }
        }

        let Some(byte) = input.skip_whitespace() else {
            return;
        };
        if byte != b'>' {
            self.unexpected(input);
            return;
        }
        input.bump();
        self.close_element(input);
    }

    fn close_element(&mut self, input: &mut Input<'_>) {
        if self.overflow > 0 {
            self.overflow -= 1;
        } else if self.stack.top() == Some(self.token.as_bytes()) {
            self.stack.pop();
        } else {
            trace!(
                expected = ?self.stack.top().map(bstr::BStr::new),
                found = ?bstr::BStr::new(self.token.as_bytes()),
                "closing tag mismatch"
            );
            if !self.raise(&input.cursor, ErrorKind::ElementEndNotMatch) {
                return;
            }
            self.stack.pop();
        }

        let cx = Context::new(&input.cursor, &self.stack, self.error);
        self.observer
            .on_element_end(&cx, Some(self.token.as_bytes()));
        self.token.clear();
        self.item_complete = false;
        self.truncated = false;
        self.state = State::Idle;
    }

    fn text(&mut self, input: &mut Input<'_>) {
        let (text, closed) = input.take_until(b'<');
        let cx = Context::new(&input.cursor, &self.stack, self.error);
        if closed {
            if !text.is_empty() || self.in_text {
                self.observer.on_data(&cx, text, false);
            }
            self.in_text = false;
            self.state = State::Idle;
        } else if !text.is_empty() {
            self.observer.on_data(&cx, text, true);
            self.in_text = true;
        }
    }

    fn comment(&mut self, input: &mut Input<'_>) {
        let start = input.pos();
        while let Some(byte) = input.peek() {
            match byte {
                b'-' => {
                    self.dashes += 1;
                    input.bump();
                }
                b'>' if self.dashes == 2 => {
                    // The terminating dashes are not content, wherever they
                    // were read.
                    let in_chunk = self.dashes - self.held_dashes;
                    let end = input.pos() - in_chunk;
                    input.bump();
                    let body = input.slice(start, end);
                    let cx = Context::new(&input.cursor, &self.stack, self.error);
                    self.observer.on_comment(&cx, body, false);
                    self.dashes = 0;
                    self.held_dashes = 0;
                    self.state = State::Idle;
                    return;
                }
                b'>' => {
                    input.mark();
                    if !self.raise(&input.cursor, ErrorKind::UnterminatedComment) {
                        return;
                    }
                    if self.held_dashes > 0 {
                        self.release_held_dashes(input);
                    }
                    self.dashes = 0;
                    input.bump();
                }
                _ => {
                    if self.held_dashes > 0 {
                        self.release_held_dashes(input);
                    }
                    self.dashes = 0;
                    input.bump();
                }
            }
        }

        // Hold back a trailing run of dashes: it may start the terminator.
        let in_chunk = self.dashes - self.held_dashes;
        let end = input.pos() - in_chunk;
        self.held_dashes = self.dashes;
        let body = input.slice(start, end);
        if !body.is_empty() {
            let cx = Context::new(&input.cursor, &self.stack, self.error);
            self.observer.on_comment(&cx, body, true);
        }
    }

    /// Reports dashes held back from an earlier chunk that turned out to be
    /// comment content.
    fn release_held_dashes(&mut self, input: &Input<'_>) {
        let cx = Context::new(&input.cursor, &self.stack, self.error);
        let mut remaining = self.held_dashes;
        while remaining > 0 {
            let n = remaining.min(DASHES.len());
            self.observer.on_comment(&cx, &DASHES[..n], true);
            remaining -= n;
        }
        self.held_dashes = 0;
    }

    fn processing_instruction(&mut self, input: &mut Input<'_>) {
        while let Some(byte) = input.peek() {
            input.bump();
            if byte == b'>' && self.question {
                self.question = false;
                self.state = State::Idle;
                return;
            }
            self.question = byte == b'?';
        }
    }

    fn doctype_skip(&mut self, input: &mut Input<'_>) {
        while let Some(byte) = input.peek() {
            input.bump();
            match byte {
                b'<' => self.brackets += 1,
                b'>' => {
                    self.brackets -= 1;
                    if self.brackets == 0 {
                        self.state = State::Idle;
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}
