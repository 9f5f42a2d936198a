use dbjson::format_escape::{escape, escape_into};

#[test]
fn test_plain_text_unchanged() {
    assert_eq!(escape(b"Hello World"), b"Hello World");
}

#[test]
fn test_empty_input() {
    assert!(escape(b"").is_empty());
}

#[test]
fn test_named_escapes() {
    let input = b"Test\n\t\r\x08\x0c\"\\";
    assert_eq!(escape(input), br#"Test\n\t\r\b\f\"\\"#);
}

#[test]
fn test_newline_and_quote() {
    assert_eq!(escape(b"the\nquick\"fox"), br#"the\nquick\"fox"#);
}

#[test]
fn test_forward_slash_is_escaped() {
    assert_eq!(escape(b"a/b"), br#"a\/b"#);
}

#[test]
fn test_other_control_bytes_use_unicode_escape() {
    assert_eq!(escape(b"\x00"), br#"\u0000"#);
    assert_eq!(escape(b"\x01x"), br#"\u0001x"#);
    assert_eq!(escape(b"\x1b"), br#"\u001b"#);
    assert_eq!(escape(b"\x1f"), br#"\u001f"#);
    assert_eq!(escape(b"\x7f"), br#"\u007f"#);
}

#[test]
fn test_unicode_passes_through() {
    let input = "Hello 世界".as_bytes();
    assert_eq!(escape(input), input);
}

#[test]
fn test_emoji_passes_through() {
    let input = "Hello 👋🏾 🌏".as_bytes();
    assert_eq!(escape(input), input);
}

#[test]
fn test_idempotent_without_reserved_bytes() {
    let input = "plain text, 123 – ünïcødé".as_bytes();
    let once = escape(input);
    assert_eq!(escape(&once), once);
}

#[test]
fn test_output_never_shorter() {
    for input in [&b"abc"[..], b"\n\n", b"\x00/\"", "日本".as_bytes()] {
        assert!(escape(input).len() >= input.len());
    }
}

#[test]
fn test_escaped_output_parses_back() {
    let original = "tab\there \"quoted\" \\ / \u{1} end";
    let mut quoted = vec![b'"'];
    escape_into(&mut quoted, original.as_bytes());
    quoted.push(b'"');
    let parsed: String = serde_json::from_slice(&quoted).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_escape_into_appends() {
    let mut out = b"prefix:".to_vec();
    escape_into(&mut out, b"\"");
    assert_eq!(out, br#"prefix:\""#);
}
