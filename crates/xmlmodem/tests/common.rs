#![allow(missing_docs)]
#![allow(dead_code)]

pub const ORIGINAL: &str = "<?xml version=\"1.0\"?><feed lang=\"en\"><entry id='1'><title>Hello, world</title><!-- first --><body>line one\nline two</body></entry><entry id='2'/><!-- x--y --></feed>";

// The document above, cut on the seams the tokenizer has to resume from.
#[rustfmt::skip]
pub const STREAM: [&str; 8] = [
    r#"<?xml version="1.0"?><feed lang="e"#,             // inside an attribute value
    r#"n"><entry id='1'><tit"#,                           // inside an element name
    r#"le>Hello, wor"#,                                    // inside text
    r#"ld</title><!-- first -"#,                           // inside the comment terminator
    r#"-><body>line one"#,                                 // text ends exactly at the chunk end
    "\nline two</body></entry><entry id='2'/><!-- x--",    // dashes that turn out to be content
    r#"y --></fe"#,                                        // inside a closing tag name
    r#"ed>"#,
];

#[test]
fn assert_stream_example() {
    assert_eq!(STREAM.concat(), ORIGINAL);
}
