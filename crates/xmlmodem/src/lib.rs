//! An incremental, bounded-memory, callback-driven XML tokenizer.
//!
//! The [`Parser`] consumes one logical document delivered in chunks of any
//! size and reports what it finds to an [`Observer`]: element begin/end,
//! attributes and their values, text and comments. It never builds a tree and
//! never allocates while parsing; its token buffer and name stack are sized
//! from [`ParserOptions`] once, when the parser is constructed.
//!
//! Text and comment payloads are handed to the observer as views into the
//! chunk being fed. Element names, attribute names and attribute values are
//! accumulated in a fixed buffer, so they are always reported whole, even when
//! they straddle chunk boundaries.
//!
//! ```rust
//! use xmlmodem::{Parser, ParserOptions, Recorder};
//!
//! let mut parser = Parser::new(Recorder::default(), ParserOptions::default());
//! parser.feed(b"<r><x a=\"1\">h").unwrap();
//! parser.feed(b"i</x></r>").unwrap();
//! parser.finish().unwrap();
//!
//! let rendered: Vec<String> = parser
//!     .observer()
//!     .events()
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(
//!     rendered,
//!     [
//!         "begin r",
//!         "begin x",
//!         "attr a",
//!         "value \"1\"",
//!         "data+ \"h\"",
//!         "data \"i\"",
//!         "end x",
//!         "end r",
//!     ]
//! );
//! ```
//!
//! Malformed input is reported through [`Observer::on_error`], which decides
//! whether the parser applies a well-defined repair and keeps going, or halts.
//! See [`ErrorKind`] for the repair attached to each error.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod tracing_macros;

mod cursor;
mod error;
mod event;
mod name_stack;
mod observer;
mod options;
mod parser;
mod scanner;
mod token_buffer;

pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ParseError};
pub use event::{Counter, Event, Recorder};
pub use observer::{Context, Observer};
pub use options::ParserOptions;
pub use parser::Parser;
