use crate::{LexerResult, LexerToken};

/// `ab\ncd\n\nef` lexed as words, end-of-lines and end-of-stream.
fn sample() -> LexerResult {
    LexerResult::new(
        "ab\ncd\n\nef".to_owned(),
        vec![
            LexerToken::new(2, 0, 2),
            LexerToken::new(3, 2, 1),
            LexerToken::new(2, 3, 2),
            LexerToken::new(3, 5, 1),
            LexerToken::new(2, 7, 2),
            LexerToken::new(0, 9, 0),
        ],
        vec![2, 5, 6],
        false,
    )
}

#[test]
fn newline_belongs_to_the_line_it_ends() {
    let r = sample();

    assert_eq!(r.line_of_position(0), (1, 1));
    assert_eq!(r.line_of_position(1), (1, 2));
    assert_eq!(r.line_of_position(2), (1, 3));
    assert_eq!(r.line_of_position(3), (2, 1));
    assert_eq!(r.line_of_position(5), (2, 3));
    assert_eq!(r.line_of_position(6), (3, 1));
    assert_eq!(r.line_of_position(7), (4, 1));
    assert_eq!(r.line_of_position(9), (4, 3));
}

#[test]
fn line_is_monotonic() {
    let r = sample();
    let lines: Vec<_> = (0..=r.buffer().len())
        .map(|o| r.line_of_position(o).0)
        .collect();

    assert!(lines.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(lines.last(), Some(&4));
}

#[test]
fn no_newlines_means_one_line() {
    let r = LexerResult::new("abc".to_owned(), vec![], vec![], false);
    assert_eq!(r.line_of_position(2), (1, 3));
    assert!(r.is_empty());
}

#[test]
fn get_string_skips_terminators_and_end() {
    let r = sample();

    assert_eq!(r.get_string(0), "ab");
    assert_eq!(r.get_string(1), "");
    assert_eq!(r.get_string(2), "cd");
    assert_eq!(r.get_string(4), "ef");
    assert_eq!(r.get_string(5), "");
}

#[test]
fn get_string_pos_carries_span() {
    let r = sample();
    let pos = r.get_string_pos(2);

    assert_eq!(pos.value, "cd");
    assert_eq!(pos.span.to_string(), "2:1-3");
    assert_eq!(pos.span.location.offset, 3);
}

#[test]
fn span_of_end_of_stream_is_empty() {
    let r = sample();
    let span = r.span(5);

    assert_eq!(span.len, 0);
    assert_eq!(span.location.line, 4);
    assert_eq!(span.at_least_one().len, 1);
}

#[test]
#[should_panic(expected = "strictly ascending")]
fn unsorted_newlines_rejected() {
    LexerResult::new("a\nb\n".to_owned(), vec![], vec![3, 1], false);
}
