//! Ready-made observers.
//!
//! [`Recorder`] keeps every event as an owned [`Event`], which is what tests
//! and small tools usually want. [`Counter`] only tallies events, the way a
//! throughput harness would.
//!
//! ```
//! use xmlmodem::{Event, Parser, ParserOptions, Recorder};
//!
//! let mut parser = Parser::new(Recorder::coalescing(), ParserOptions::default());
//! parser.feed(b"<p>hel").unwrap();
//! parser.feed(b"lo</p>").unwrap();
//!
//! let events = parser.into_observer().into_events();
//! assert_eq!(
//!     events[1],
//!     Event::Data {
//!         text: "hello".into(),
//!         partial: false
//!     }
//! );
//! ```
use alloc::vec::Vec;
use core::fmt;

use bstr::BString;

use crate::{
    error::ParseError,
    observer::{Context, Observer},
};

/// An owned copy of one observer callback.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Event {
    /// [`Observer::on_element_begin`].
    ElementBegin {
        /// Element name.
        name: BString,
    },
    /// [`Observer::on_element_end`].
    ElementEnd {
        /// Closing tag name; `None` for a self-closing tag.
        name: Option<BString>,
    },
    /// [`Observer::on_attribute`].
    Attribute {
        /// Attribute name.
        name: BString,
    },
    /// [`Observer::on_attribute_value`].
    AttributeValue {
        /// Attribute value, without the quotes.
        value: BString,
    },
    /// [`Observer::on_data`].
    Data {
        /// Character data.
        text: BString,
        /// More of the same text follows.
        partial: bool,
    },
    /// [`Observer::on_comment`].
    Comment {
        /// Comment content.
        text: BString,
        /// More of the same comment follows.
        partial: bool,
    },
    /// [`Observer::on_error`].
    Error(ParseError),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ElementBegin { name } => write!(f, "begin {name}"),
            Event::ElementEnd { name: Some(name) } => write!(f, "end {name}"),
            Event::ElementEnd { name: None } => f.write_str("end"),
            Event::Attribute { name } => write!(f, "attr {name}"),
            Event::AttributeValue { value } => write!(f, "value {value:?}"),
            Event::Data { text, partial } => {
                write!(f, "data{} {text:?}", if *partial { "+" } else { "" })
            }
            Event::Comment { text, partial } => {
                write!(f, "comment{} {text:?}", if *partial { "+" } else { "" })
            }
            Event::Error(err) => write!(f, "error {:?} at {}:{}", err.kind, err.line, err.column),
        }
    }
}

/// Records every event.
///
/// By default each callback becomes one [`Event`], so the chunking of text
/// and comments stays visible. A [coalescing](Self::coalescing) recorder
/// merges consecutive slices of the same text or comment into one event,
/// which makes the recording independent of how the document was split.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Vec<Event>,
    coalesce: bool,
    policy: Option<bool>,
}

impl Recorder {
    /// A recorder that keeps each slice as its own event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that merges partial text and comment slices.
    #[must_use]
    pub fn coalescing() -> Self {
        Self {
            coalesce: true,
            ..Self::default()
        }
    }

    /// Answers every error with `proceed` instead of the configured default.
    #[must_use]
    pub fn with_policy(mut self, proceed: bool) -> Self {
        self.policy = Some(proceed);
        self
    }

    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the recorder, returning the events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Forgets the recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn push_data(&mut self, text: &[u8], partial: bool) {
        if self.coalesce {
            if let Some(Event::Data {
                text: prev,
                partial: open @ true,
            }) = self.events.last_mut()
            {
                prev.extend_from_slice(text);
                *open = partial;
                return;
            }
        }
        self.events.push(Event::Data {
            text: text.into(),
            partial,
        });
    }

    fn push_comment(&mut self, text: &[u8], partial: bool) {
        if self.coalesce {
            if let Some(Event::Comment {
                text: prev,
                partial: open @ true,
            }) = self.events.last_mut()
            {
                prev.extend_from_slice(text);
                *open = partial;
                return;
            }
        }
        self.events.push(Event::Comment {
            text: text.into(),
            partial,
        });
    }
}

impl Observer for Recorder {
    fn on_element_begin(&mut self, _cx: &Context<'_>, name: &[u8]) {
        self.events.push(Event::ElementBegin { name: name.into() });
    }

    fn on_element_end(&mut self, _cx: &Context<'_>, name: Option<&[u8]>) {
        self.events.push(Event::ElementEnd {
            name: name.map(BString::from),
        });
    }

    fn on_attribute(&mut self, _cx: &Context<'_>, name: &[u8]) {
        self.events.push(Event::Attribute { name: name.into() });
    }

    fn on_attribute_value(&mut self, _cx: &Context<'_>, value: &[u8], _partial: bool) {
        self.events.push(Event::AttributeValue {
            value: value.into(),
        });
    }

    fn on_data(&mut self, _cx: &Context<'_>, text: &[u8], partial: bool) {
        self.push_data(text, partial);
    }

    fn on_comment(&mut self, _cx: &Context<'_>, text: &[u8], partial: bool) {
        self.push_comment(text, partial);
    }

    fn on_error(&mut self, cx: &Context<'_>, try_continue: bool) -> bool {
        if let Some(kind) = cx.error() {
            self.events.push(Event::Error(ParseError {
                kind,
                line: cx.line(),
                column: cx.column(),
            }));
        }
        self.policy.unwrap_or(try_continue)
    }
}

/// Counts events without keeping them.
///
/// Text and comments are counted once per logical span, however many slices
/// they were reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    /// Opening tags, including self-closing ones.
    pub elements: usize,
    /// Attribute names.
    pub attributes: usize,
    /// Text spans.
    pub data: usize,
    /// Comments.
    pub comments: usize,
    /// Errors reported to the observer.
    pub errors: usize,
}

impl Observer for Counter {
    fn on_element_begin(&mut self, _cx: &Context<'_>, _name: &[u8]) {
        self.elements += 1;
    }

    fn on_attribute(&mut self, _cx: &Context<'_>, _name: &[u8]) {
        self.attributes += 1;
    }

    fn on_data(&mut self, _cx: &Context<'_>, _text: &[u8], partial: bool) {
        if !partial {
            self.data += 1;
        }
    }

    fn on_comment(&mut self, _cx: &Context<'_>, _text: &[u8], partial: bool) {
        if !partial {
            self.comments += 1;
        }
    }

    fn on_error(&mut self, _cx: &Context<'_>, try_continue: bool) -> bool {
        self.errors += 1;
        try_continue
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "elements: {}, attributes: {}, data: {}, comments: {}, errors: {}",
            self.elements, self.attributes, self.data, self.comments, self.errors
        )
    }
}
