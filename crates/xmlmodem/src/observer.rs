//! The event sink driven by [`Parser`](crate::Parser).

use crate::{cursor::Cursor, error::ErrorKind, name_stack::NameStack};

/// Read-only view of the parser handed to every [`Observer`] callback.
#[derive(Debug, Clone, Copy)]
pub struct Context<'p> {
    cursor: &'p Cursor,
    stack: &'p NameStack,
    error: Option<ErrorKind>,
}

impl<'p> Context<'p> {
    pub(crate) fn new(cursor: &'p Cursor, stack: &'p NameStack, error: Option<ErrorKind>) -> Self {
        Self {
            cursor,
            stack,
            error,
        }
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

    /// Byte offset of the start of the most recent token within the whole
    /// stream.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// The error being reported, inside [`Observer::on_error`]; `None`
    /// elsewhere.
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
    pub fn stack_value(&self, index: usize) -> Option<&'p [u8]> {
        self.stack.get(index)
    }
}

/// Receives the events of one document.
///
/// Every method has a no-op default, so an implementation only overrides what
/// it needs. Payloads borrow either the parser's token buffer (names and
/// attribute values) or the chunk being fed (text and comments); copy them if
/// they must outlive the call.
pub trait Observer {
    /// An opening tag's name was read.
    fn on_element_begin(&mut self, cx: &Context<'_>, name: &[u8]) {
        let _ = (cx, name);
    }

    /// An element was closed. `name` is `None` for a self-closing tag
    /// (`<a/>`) and the closing tag's name otherwise.
    fn on_element_end(&mut self, cx: &Context<'_>, name: Option<&[u8]>) {
        let _ = (cx, name);
    }

    /// An attribute name was read.
    fn on_attribute(&mut self, cx: &Context<'_>, name: &[u8]) {
        let _ = (cx, name);
    }

    /// The value of the last reported attribute.
    ///
    /// Values are always reported whole, so `partial` is `false`.
    fn on_attribute_value(&mut self, cx: &Context<'_>, value: &[u8], partial: bool) {
        let _ = (cx, value, partial);
    }

    /// A slice of character data.
    ///
    /// `partial` is `true` when the chunk ended before the text did; the rest
    /// follows in later calls, the last of which has `partial == false`.
    /// Concatenating the slices gives the text.
    fn on_data(&mut self, cx: &Context<'_>, text: &[u8], partial: bool) {
        let _ = (cx, text, partial);
    }

    /// A slice of a comment's content (between `<!--` and `-->`).
    ///
    /// Each `feed` call reports the part of the comment it saw; the final
    /// slice has `partial == false`.
    fn on_comment(&mut self, cx: &Context<'_>, text: &[u8], partial: bool) {
        let _ = (cx, text, partial);
    }

    /// Decides how to handle the error in [`Context::error`].
    ///
    /// `try_continue` is the configured default
    /// ([`ParserOptions::try_continue_on_error`](crate::ParserOptions::try_continue_on_error)).
    /// Return `true` to apply the repair documented on the
    /// [`ErrorKind`] and continue, or `false` to halt.
    fn on_error(&mut self, cx: &Context<'_>, try_continue: bool) -> bool {
        let _ = cx;
        try_continue
    }
}

/// Discards every event and follows the default error policy.
impl Observer for () {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_element_begin(&mut self, cx: &Context<'_>, name: &[u8]) {
        (**self).on_element_begin(cx, name);
    }

    fn on_element_end(&mut self, cx: &Context<'_>, name: Option<&[u8]>) {
        (**self).on_element_end(cx, name);
    }

    fn on_attribute(&mut self, cx: &Context<'_>, name: &[u8]) {
        (**self).on_attribute(cx, name);
    }

    fn on_attribute_value(&mut self, cx: &Context<'_>, value: &[u8], partial: bool) {
        (**self).on_attribute_value(cx, value, partial);
    }

    fn on_data(&mut self, cx: &Context<'_>, text: &[u8], partial: bool) {
        (**self).on_data(cx, text, partial);
    }

    fn on_comment(&mut self, cx: &Context<'_>, text: &[u8], partial: bool) {
        (**self).on_comment(cx, text, partial);
    }

    fn on_error(&mut self, cx: &Context<'_>, try_continue: bool) -> bool {
        (**self).on_error(cx, try_continue)
    }
}
