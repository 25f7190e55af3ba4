use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{Event, ParseError, Parser, ParserOptions, Recorder};

mod arbitrary;
mod parse_good;

/// Options with the continue-on-error policy.
pub(crate) fn recovering() -> ParserOptions {
    ParserOptions {
        try_continue_on_error: true,
        ..Default::default()
    }
}

pub(crate) fn render(events: &[Event]) -> Vec<String> {
    events.iter().map(ToString::to_string).collect()
}

/// Feeds `chunks` to a fresh parser, then calls `finish`.
///
/// Stops at the first error returned and hands back the parser for
/// inspection.
pub(crate) fn run(
    chunks: &[&[u8]],
    options: ParserOptions,
) -> (Parser<Recorder>, Result<(), ParseError>) {
    let mut parser = Parser::new(Recorder::new(), options);
    for chunk in chunks {
        if let Err(err) = parser.feed(chunk) {
            return (parser, Err(err));
        }
    }
    let result = parser.finish();
    (parser, result)
}

/// Parses `doc` in one chunk and renders the events.
pub(crate) fn events(doc: &[u8], options: ParserOptions) -> Vec<String> {
    let (parser, _) = run(&[doc], options);
    render(parser.observer().events())
}
