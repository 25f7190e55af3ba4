use alloc::{string::String, vec, vec::Vec};

use rstest::rstest;

use super::{events, render, run};
use crate::{
    Context, Event, Observer, Parser, ParserOptions, Recorder, chunk_utils::produce_chunks,
};

#[test]
fn nested_elements_with_attribute_and_text() {
    assert_eq!(
        events(br#"<r><x a="1">hi</x></r>"#, ParserOptions::default()),
        vec![
            "begin r",
            "begin x",
            "attr a",
            "value \"1\"",
            "data \"hi\"",
            "end x",
            "end r",
        ]
    );
}

#[test]
fn self_closing_end_has_no_name() {
    assert_eq!(
        events(b"<a/>", ParserOptions::default()),
        vec!["begin a", "end"]
    );
    assert_eq!(
        events(b"<a></a>", ParserOptions::default()),
        vec!["begin a", "end a"]
    );
}

#[test]
fn dashes_inside_comment_do_not_end_it() {
    assert_eq!(
        events(b"<!-- a--b -->", ParserOptions::default()),
        vec!["comment \" a--b \""]
    );
}

#[test]
fn empty_comment() {
    assert_eq!(
        events(b"<a><!----></a>", ParserOptions::default()),
        vec!["begin a", "comment \"\"", "end a"]
    );
}

#[test]
fn prolog_and_doctype_are_skipped() {
    let doc = b"<?xml version=\"1.0\"?>\n<!DOCTYPE r [<!ELEMENT r ANY>]>\n<r/>";
    assert_eq!(
        events(doc, ParserOptions::default()),
        vec!["begin r", "end"]
    );
}

#[test]
fn processing_instruction_inside_element() {
    assert_eq!(
        events(b"<a>x<?php echo '?'; ?>y</a>", ParserOptions::default()),
        vec!["begin a", "data \"x\"", "data \"y\"", "end a"]
    );
}

#[test]
fn attribute_forms() {
    let mut parser = Parser::new(Recorder::new(), ParserOptions::default());
    parser
        .feed(b"<a k='say \"hi\"' flag n = \"v\" >")
        .unwrap();
    assert_eq!(parser.stack_size(), 1);
    assert_eq!(
        parser.observer().events(),
        [
            Event::ElementBegin { name: "a".into() },
            Event::Attribute { name: "k".into() },
            Event::AttributeValue {
                value: "say \"hi\"".into()
            },
            Event::Attribute {
                name: "flag".into()
            },
            Event::Attribute { name: "n".into() },
            Event::AttributeValue { value: "v".into() },
        ]
    );
}

#[test]
fn names_accept_colons_dashes_and_digits() {
    assert_eq!(
        events(b"<x:a-1_b y:z-2='1'></x:a-1_b>", ParserOptions::default()),
        vec![
            "begin x:a-1_b",
            "attr y:z-2",
            "value \"1\"",
            "end x:a-1_b"
        ]
    );
}

#[test]
fn whitespace_before_closing_bracket() {
    assert_eq!(
        events(b"<a\n></a \t>", ParserOptions::default()),
        vec!["begin a", "end a"]
    );
}

#[test]
fn leading_whitespace_of_text_is_skipped() {
    assert_eq!(
        events(b"<a>\n  two words \n</a>", ParserOptions::default()),
        vec!["begin a", "data \"two words \\n\"", "end a"]
    );
}

#[test]
fn text_split_across_chunks_is_closed_by_empty_slice() {
    let (parser, result) = run(&[b"<a>he", b"llo", b"</a>"], ParserOptions::default());
    assert!(result.is_ok());
    assert_eq!(
        render(parser.observer().events()),
        vec![
            "begin a",
            "data+ \"he\"",
            "data+ \"llo\"",
            "data \"\"",
            "end a"
        ]
    );
}

#[test]
fn finish_closes_trailing_text() {
    let (parser, result) = run(&[b"hello"], ParserOptions::default());
    assert!(result.is_ok());
    assert_eq!(
        render(parser.observer().events()),
        vec!["data+ \"hello\"", "data \"\""]
    );
}

#[test]
fn comment_terminator_split_across_chunks() {
    let (parser, result) = run(&[b"<!-- a -", b"-", b">"], ParserOptions::default());
    assert!(result.is_ok());
    assert_eq!(
        render(parser.observer().events()),
        vec!["comment+ \" a \"", "comment \"\""]
    );
}

#[test]
fn held_back_dashes_that_are_content_are_reported() {
    let (parser, result) = run(&[b"<!--x-", b"-y-->"], ParserOptions::default());
    assert!(result.is_ok());
    assert_eq!(
        render(parser.observer().events()),
        vec!["comment+ \"x\"", "comment+ \"-\"", "comment \"-y\""]
    );
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(8)]
#[case(64)]
fn coalesced_events_do_not_depend_on_chunking(#[case] parts: usize) {
    let doc: &[u8] =
        b"<?xml version='1.0'?><doc kind=\"test\"><!-- note -- here --><p>one<b>two</b>three</p><e/></doc>";
    let mut parser = Parser::new(Recorder::coalescing(), ParserOptions::default());
    for chunk in produce_chunks(doc, parts) {
        parser.feed(chunk).unwrap();
    }
    parser.finish().unwrap();
    assert_eq!(
        render(parser.observer().events()),
        vec![
            "begin doc",
            "attr kind",
            "value \"test\"",
            "comment \" note -- here \"",
            "begin p",
            "data \"one\"",
            "begin b",
            "data \"two\"",
            "end b",
            "data \"three\"",
            "end p",
            "begin e",
            "end",
            "end doc",
        ]
    );
}

/// Records where each element starts and the open path seen by callbacks.
#[derive(Default)]
struct Positions {
    begins: Vec<(String, usize, usize)>,
    paths: Vec<String>,
}

impl Positions {
    fn path(cx: &Context<'_>) -> String {
        let names: Vec<String> = (0..cx.stack_size())
            .map(|i| String::from_utf8_lossy(cx.stack_value(i).unwrap()).into_owned())
            .collect();
        names.join("/")
    }
}

impl Observer for Positions {
    fn on_element_begin(&mut self, cx: &Context<'_>, name: &[u8]) {
        self.begins.push((
            String::from_utf8_lossy(name).into_owned(),
            cx.line(),
            cx.column(),
        ));
        self.paths.push(Self::path(cx));
    }

    fn on_element_end(&mut self, cx: &Context<'_>, _name: Option<&[u8]>) {
        self.paths.push(Self::path(cx));
    }
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(100)]
fn line_and_column_survive_chunking(#[case] parts: usize) {
    let doc: &[u8] = b"<a>\n  <b/>\r\n<c/></a>";
    let mut parser = Parser::new(Positions::default(), ParserOptions::default());
    for chunk in produce_chunks(doc, parts) {
        parser.feed(chunk).unwrap();
    }
    parser.finish().unwrap();
    let expected: Vec<(String, usize, usize)> = vec![
        ("a".into(), 1, 2),
        ("b".into(), 2, 4),
        ("c".into(), 3, 2),
    ];
    assert_eq!(parser.into_observer().begins, expected);
}

#[test]
fn callbacks_see_the_open_path() {
    let mut parser = Parser::new(Positions::default(), ParserOptions::default());
    parser.feed(b"<a><b><c/></b></a>").unwrap();
    assert_eq!(parser.stack_size(), 0);
    assert_eq!(
        parser.observer().paths,
        vec!["a", "a/b", "a/b/c", "a/b", "a", ""]
    );
}

#[test]
fn stack_is_inspectable_between_chunks() {
    let mut parser = Parser::new((), ParserOptions::default());
    parser.feed(b"<root><child attr='x'><gr").unwrap();
    assert_eq!(parser.stack_size(), 2);
    assert_eq!(parser.stack_value(0), Some(&b"root"[..]));
    assert_eq!(parser.stack_value(1), Some(&b"child"[..]));
    assert_eq!(parser.stack_value(2), None);
    assert_eq!(parser.context().stack_size(), 2);
}

#[test]
fn observer_can_be_swapped_between_chunks() {
    let mut parser = Parser::new(Recorder::new(), ParserOptions::default());
    parser.feed(b"<a><b/>").unwrap();
    let first = parser.set_observer(Recorder::new());
    parser.feed(b"</a>").unwrap();
    assert_eq!(render(first.events()), vec!["begin a", "begin b", "end"]);
    assert_eq!(render(parser.observer().events()), vec!["end a"]);
}

#[test]
fn borrowed_observer() {
    let mut recorder = Recorder::new();
    {
        let mut parser = Parser::new(&mut recorder, ParserOptions::default());
        parser.feed(b"<a/>").unwrap();
        parser.finish().unwrap();
    }
    assert_eq!(recorder.events().len(), 2);
}

#[test]
fn empty_document_and_empty_chunks() {
    let (parser, result) = run(&[b"", b"  \n", b""], ParserOptions::default());
    assert!(result.is_ok());
    assert!(parser.observer().events().is_empty());
}
