use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;
use quickcheck::{Arbitrary, Gen};

const NAME_START: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCXYZ";
const NAME_REST: &[u8] = b"abcxyz0129_:-";
const TEXT: &[u8] = b"abc xyz\n\t>&;'\"=/!?-";
const VALUE: &[u8] = b"abc xyz<>&;=/!?-\n";
const COMMENT: &[u8] = b"abc xyz<&;='\"/!?-\n";

fn pick(g: &mut Gen, set: &[u8]) -> u8 {
    set[usize::arbitrary(g) % set.len()]
}

fn push_run(g: &mut Gen, set: &[u8], max: usize, out: &mut Vec<u8>) {
    for _ in 0..usize::arbitrary(g) % max {
        out.push(pick(g, set));
    }
}

fn name(g: &mut Gen) -> Vec<u8> {
    let mut name = Vec::new();
    name.push(pick(g, NAME_START));
    push_run(g, NAME_REST, 6, &mut name);
    name
}

fn whitespace(g: &mut Gen, out: &mut Vec<u8>) {
    push_run(g, b" \t\r\n", 3, out);
}

fn attribute(g: &mut Gen, out: &mut Vec<u8>) {
    out.push(b' ');
    out.extend(name(g));
    if usize::arbitrary(g) % 4 == 0 {
        return;
    }
    whitespace(g, out);
    out.push(b'=');
    whitespace(g, out);
    let quote = if bool::arbitrary(g) { b'"' } else { b'\'' };
    let other = if quote == b'"' { b'\'' } else { b'"' };
    out.push(quote);
    for _ in 0..usize::arbitrary(g) % 12 {
        if usize::arbitrary(g) % 8 == 0 {
            out.push(other);
        } else {
            out.push(pick(g, VALUE));
        }
    }
    out.push(quote);
}

fn text(g: &mut Gen, out: &mut Vec<u8>) {
    out.push(pick(g, NAME_START));
    push_run(g, TEXT, 16, out);
}

fn comment(g: &mut Gen, out: &mut Vec<u8>) {
    out.extend(b"<!--");
    push_run(g, COMMENT, 16, out);
    // A dash right before `-->` would make it `--->`, which does not close.
    if out.last() == Some(&b'-') {
        out.push(b'z');
    }
    out.extend(b"-->");
}

fn element(g: &mut Gen, depth: usize, out: &mut Vec<u8>) {
    let name = name(g);
    out.push(b'<');
    out.extend(&name);
    for _ in 0..usize::arbitrary(g) % 3 {
        attribute(g, out);
    }
    whitespace(g, out);
    if depth == 0 || usize::arbitrary(g) % 4 == 0 {
        out.extend(b"/>");
        return;
    }
    out.push(b'>');
    for _ in 0..usize::arbitrary(g) % 4 {
        match usize::arbitrary(g) % 4 {
            0 => text(g, out),
            1 => comment(g, out),
            2 => out.extend(b"<?pi data?>"),
            _ => element(g, depth - 1, out),
        }
        whitespace(g, out);
    }
    out.extend(b"</");
    out.extend(&name);
    whitespace(g, out);
    out.push(b'>');
}

/// A well-formed document within the default limits.
#[derive(Clone)]
pub(crate) struct Document(pub(crate) Vec<u8>);

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(BStr::new(&self.0), f)
    }
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = Vec::new();
        if bool::arbitrary(g) {
            out.extend(b"<?xml version=\"1.0\"?>\n");
        }
        if bool::arbitrary(g) {
            comment(g, &mut out);
        }
        whitespace(g, &mut out);
        let depth = usize::arbitrary(g) % 5;
        element(g, depth, &mut out);
        whitespace(g, &mut out);
        Self(out)
    }
}

/// Arbitrary bytes biased towards markup, for robustness checks.
#[derive(Clone)]
pub(crate) struct Markup(pub(crate) Vec<u8>);

impl fmt::Debug for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(BStr::new(&self.0), f)
    }
}

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        const BYTES: &[u8] = b"<>/!?-='\" \nabxyz0:";
        let len = usize::arbitrary(g) % 256;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            if usize::arbitrary(g) % 16 == 0 {
                out.push(u8::arbitrary(g));
            } else {
                out.push(pick(g, BYTES));
            }
        }
        Self(out)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(self.0.shrink().map(Self))
    }
}
