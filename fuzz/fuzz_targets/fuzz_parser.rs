#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use xmlmodem::{Context, Observer, Parser, ParserOptions, chunk_utils::split_at_offsets};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    recover: bool,
    max_name_length: u8,
    max_value_length: u8,
    max_stack_size: u8,
    splits: Vec<u16>,
    data: &'a [u8],
}

/// Checks the invariants every callback must see.
struct Bounded {
    max_stack_size: usize,
    open: bool,
}

impl Observer for Bounded {
    fn on_element_begin(&mut self, cx: &Context<'_>, _name: &[u8]) {
        assert!(cx.stack_size() <= self.max_stack_size);
    }

    fn on_element_end(&mut self, cx: &Context<'_>, _name: Option<&[u8]>) {
        assert!(cx.stack_size() <= self.max_stack_size);
    }

    fn on_data(&mut self, _cx: &Context<'_>, _text: &[u8], partial: bool) {
        self.open = partial;
    }

    fn on_error(&mut self, cx: &Context<'_>, try_continue: bool) -> bool {
        assert!(cx.error().is_some());
        try_continue
    }
}

fn run(input: &Input<'_>) {
    let options = ParserOptions {
        max_name_length: usize::from(input.max_name_length),
        max_value_length: usize::from(input.max_value_length),
        max_stack_size: usize::from(input.max_stack_size % 64),
        try_continue_on_error: input.recover,
    };
    let observer = Bounded {
        max_stack_size: options.max_stack_size,
        open: false,
    };
    let offsets: Vec<usize> = input.splits.iter().map(|&s| usize::from(s)).collect();

    let mut parser = Parser::new(observer, options);
    for chunk in split_at_offsets(input.data, &offsets) {
        if parser.feed(chunk).is_err() {
            assert!(parser.error().is_some());
            // Halted until reset.
            assert!(parser.feed(b"<a>").is_err());
            return;
        }
        assert!(parser.stack_size() <= options.max_stack_size);
    }
    let _ = parser.finish();
    // `finish` closes any open text span.
    assert!(!parser.observer().open);
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = Input::arbitrary_take_rest(Unstructured::new(data)) {
        run(&input);
    }
});
