/// Configuration options for the XML tokenizer.
///
/// The limits size the parser's internal storage, which is allocated once
/// when the [`Parser`](crate::Parser) is constructed and never grows. Options
/// cannot be changed after construction.
///
/// # Examples
///
/// ```rust
/// use xmlmodem::{Parser, ParserOptions};
///
/// let options = ParserOptions {
///     max_stack_size: 64,
///     try_continue_on_error: true,
///     ..Default::default()
/// };
/// let parser = Parser::new((), options);
/// assert_eq!(parser.options().max_stack_size, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserOptions {
    /// Maximum length in bytes of an element or attribute name.
    ///
    /// A longer name raises
    /// [`MaxElementNameLengthExceeded`](crate::ErrorKind::MaxElementNameLengthExceeded)
    /// or
    /// [`MaxAttrNameLengthExceeded`](crate::ErrorKind::MaxAttrNameLengthExceeded).
    /// This is also the size of each name stack slot.
    ///
    /// # Default
    ///
    /// `32`
    pub max_name_length: usize,

    /// Maximum length in bytes of an attribute value.
    ///
    /// Attribute values are always reported whole, so they are accumulated
    /// internally; a longer value raises
    /// [`MaxAttrValueLengthExceeded`](crate::ErrorKind::MaxAttrValueLengthExceeded).
    /// Text and comments are not bounded by this limit.
    ///
    /// # Default
    ///
    /// `512`
    pub max_value_length: usize,

    /// Maximum number of simultaneously open elements.
    ///
    /// Opening one more element raises
    /// [`MaxNestingDepthExceeded`](crate::ErrorKind::MaxNestingDepthExceeded).
    ///
    /// # Default
    ///
    /// `16`
    pub max_stack_size: usize,

    /// The recovery decision proposed to
    /// [`Observer::on_error`](crate::Observer::on_error).
    ///
    /// Observers that do not override `on_error` return this value unchanged,
    /// so it acts as the parser-wide policy: `true` applies the repair
    /// documented for each error and keeps parsing, `false` halts at the
    /// offending byte.
    ///
    /// # Default
    ///
    /// `false`
    pub try_continue_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_name_length: 32,
            max_value_length: 512,
            max_stack_size: 16,
            try_continue_on_error: false,
        }
    }
}

impl ParserOptions {
    /// Capacity of the token buffer shared by names and attribute values.
    pub(crate) fn token_capacity(&self) -> usize {
        self.max_name_length.max(self.max_value_length)
    }
}
