#![no_main]

use libfuzzer_sys::fuzz_target;
use stalg_syntax::{
    lex, parse_algorithm, parse_expression_source, parse_initializer_expression_source,
    parse_method, parse_source, parse_statements, Diagnostic, TokenStream,
};

const MAX_SOURCE_BYTES: usize = 8192;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fn check_ranges(source: &str, diagnostics: &[Diagnostic]) {
    let len = source.len() as u32;
    for diagnostic in diagnostics {
        assert!(u32::from(diagnostic.range.end()) <= len, "diagnostic past end of input");
        assert!(source.is_char_boundary(usize::from(diagnostic.range.start())));
    }
}

fuzz_target!(|data: &[u8]| {
    let source = decode_source(data);

    let tokens = lex(&source);
    let covered: u32 = tokens.iter().map(|token| u32::from(token.range.len())).sum();
    assert_eq!(covered as usize, source.len(), "tokens must cover the input");

    check_ranges(&source, parse_source(TokenStream::new(tokens, &source)).diagnostics());
    check_ranges(&source, parse_algorithm(source.as_str()).diagnostics());
    check_ranges(&source, parse_method(source.as_str()).diagnostics());
    check_ranges(&source, parse_statements(source.as_str()).diagnostics());
    check_ranges(&source, parse_expression_source(source.as_str()).diagnostics());
    check_ranges(
        &source,
        parse_initializer_expression_source(source.as_str()).diagnostics(),
    );

    let wrapped = format!("ALGORITHM Fuzz\n{source}\nEND_ALGORITHM\n");
    check_ranges(&wrapped, parse_algorithm(wrapped.as_str()).diagnostics());
});
