use super::*;

#[test]
fn normalize_line_endings_test() {
    assert_eq!("a\nb\n", normalize_line_endings("a\r\nb\r\n"));
    assert_eq!("a\nb\nc", normalize_line_endings("a\rb\r\nc"));
    assert_eq!("a\n\nb", normalize_line_endings("a\r\rb"));
    assert!(matches!(normalize_line_endings("plain\n"), Cow::Borrowed("plain\n")));
}

#[test]
fn drain_text_keeps_unfinished_character_test() {
    let euro = "€".as_bytes();
    let mut buffer = b"price: ".to_vec();
    buffer.extend_from_slice(&euro[..2]);

    assert_eq!("price: ", drain_text(&mut buffer, false));
    assert_eq!(&euro[..2], buffer.as_slice());

    buffer.extend_from_slice(&euro[2..]);
    buffer.extend_from_slice(b"5\n");

    assert_eq!("€5\n", drain_text(&mut buffer, false));
    assert!(buffer.is_empty());
}

#[test]
fn drain_text_keeps_trailing_carriage_return_test() {
    let mut buffer = b"line\r".to_vec();
    assert_eq!("line", drain_text(&mut buffer, false));
    assert_eq!(b"\r", buffer.as_slice());

    buffer.extend_from_slice(b"\nnext");
    assert_eq!("\nnext", drain_text(&mut buffer, false));
}

#[test]
fn drain_text_final_flush_test() {
    let mut buffer = vec![b'a', 0xE2, 0x82];
    assert_eq!("a", drain_text(&mut buffer, false));
    assert_eq!("\u{FFFD}", drain_text(&mut buffer, true));
    assert!(buffer.is_empty());

    assert_eq!("", drain_text(&mut buffer, true));
}
