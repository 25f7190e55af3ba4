use thiserror::Error;

/// The kinds of malformed input the tokenizer detects.
///
/// Each kind is raised at a specific byte and reported through
/// [`Observer::on_error`](crate::Observer::on_error). When the observer
/// allows recovery the parser applies the repair listed here; otherwise it
/// halts until [`Parser::reset`](crate::Parser::reset).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A closing tag names something other than the innermost open element,
    /// or no element is open.
    ///
    /// Recovery: the innermost element is popped and the end event is
    /// reported as though the names matched.
    #[error("closing tag does not match the open element")]
    ElementEndNotMatch,
    /// A byte that cannot appear at this point of a tag.
    ///
    /// Recovery: the byte is skipped.
    #[error("unexpected character")]
    UnexpectedChar,
    /// A `>` inside a comment not preceded by exactly `--`, or the input
    /// ended inside a comment.
    ///
    /// Recovery: the `>` is kept as comment content and the comment goes on.
    #[error("unterminated comment")]
    UnterminatedComment,
    /// An element name is longer than
    /// [`max_name_length`](crate::ParserOptions::max_name_length).
    ///
    /// Recovery: the prefix read so far becomes the name and the rest of the
    /// name is discarded.
    #[error("element name is too long")]
    MaxElementNameLengthExceeded,
    /// An attribute name is longer than
    /// [`max_name_length`](crate::ParserOptions::max_name_length).
    ///
    /// Recovery: as for element names.
    #[error("attribute name is too long")]
    MaxAttrNameLengthExceeded,
    /// An attribute value is longer than
    /// [`max_value_length`](crate::ParserOptions::max_value_length).
    ///
    /// Recovery: the prefix read so far becomes the value and the rest of the
    /// value is discarded.
    #[error("attribute value is too long")]
    MaxAttrValueLengthExceeded,
    /// Opening an element would exceed
    /// [`max_stack_size`](crate::ParserOptions::max_stack_size).
    ///
    /// Recovery: the element is reported but not recorded on the name stack;
    /// its closing tag is accepted without being checked.
    #[error("maximum nesting depth exceeded")]
    MaxNestingDepthExceeded,
    /// The document ended with open elements or inside a tag.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// An [`ErrorKind`] together with the position of the token it was raised
/// on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in bytes.
    pub column: usize,
}
