use bytebuf::{BufferError, BufferInput, ByteBuffer, Encoding};

#[test]
fn sized_buffers_read_as_zero() {
    for n in [0usize, 1, 7, 64] {
        let buf = ByteBuffer::new(BufferInput::BySize(n)).unwrap();
        assert_eq!(buf.len(), n);
        for i in 0..n {
            assert_eq!(buf.read_u8(i).unwrap(), 0);
        }
    }
}

#[test]
fn utf8_round_trip() {
    for s in ["", "Hello", "héllo wörld", "日本語", "emoji 🦀"] {
        let buf = ByteBuffer::from_text(s, Encoding::Utf8).unwrap();
        assert_eq!(buf.to_string_as(Encoding::Utf8), s);
    }
}

#[test]
fn hex_round_trip() {
    for h in ["", "00", "68656c6c6f", "deadbeef00ff"] {
        let buf = ByteBuffer::from_text(h, Encoding::Hex).unwrap();
        assert_eq!(buf.len(), h.len() / 2);
        assert_eq!(buf.to_string_as(Encoding::Hex), h);
    }
}

#[test]
fn hex_input_decodes_to_text() {
    let buf = ByteBuffer::from_encoded("68656c6c6f", Encoding::Hex).unwrap();
    assert_eq!(buf.to_string_as(Encoding::Utf8), "hello");
}

#[test]
fn slice_middle() {
    let buf = ByteBuffer::from("Hello");
    assert_eq!(buf.slice(1, Some(3)).to_string(), "el");
}

#[test]
fn slice_defaults_and_past_end() {
    let buf = ByteBuffer::from("Hello");
    assert_eq!(buf.slice(2, None).to_string(), "llo");
    assert_eq!(buf.slice(5, None).len(), 0);
    assert_eq!(buf.slice(9, Some(12)).len(), 0);
}

#[test]
fn set_then_read() {
    let mut buf = ByteBuffer::from("Hello");
    buf.set(65, 0).unwrap();
    assert_eq!(buf.to_string(), "Aello");
    assert_eq!(buf.read_u8(0).unwrap(), 65);
}

#[test]
fn write_truncates() {
    let mut buf = ByteBuffer::alloc(3);
    assert_eq!(buf.write("Hello", Encoding::Utf8).unwrap(), 3);
    assert_eq!(buf.to_string(), "Hel");
}

#[test]
fn write_hex_text() {
    let mut buf = ByteBuffer::alloc(4);
    assert_eq!(buf.write("ffee", Encoding::Hex).unwrap(), 2);
    assert_eq!(buf.as_slice(), &[0xff, 0xee, 0, 0]);
}

#[test]
fn offsets_at_or_past_length_are_out_of_bounds() {
    let mut buf = ByteBuffer::from("abc");
    for offset in [3usize, 4, 100] {
        assert!(matches!(buf.read_u8(offset), Err(BufferError::OutOfBounds { .. })));
        assert!(matches!(buf.set(1, offset), Err(BufferError::OutOfBounds { .. })));
    }
    assert_eq!(buf.to_string(), "abc");
}

#[test]
fn negative_offsets_are_out_of_bounds() {
    let buf = ByteBuffer::from("abc");
    assert_eq!(
        buf.checked_offset(-1),
        Err(BufferError::OutOfBounds { offset: -1, len: 3 })
    );
}

#[test]
fn odd_length_hex_is_invalid() {
    assert!(matches!(
        ByteBuffer::from_text("abc", Encoding::Hex),
        Err(BufferError::InvalidEncoding(_))
    ));
}

#[test]
fn non_hex_digits_are_invalid() {
    assert!(matches!(
        ByteBuffer::from_text("zz", Encoding::Hex),
        Err(BufferError::InvalidEncoding(_))
    ));
}

#[test]
fn unsupported_encoding_name() {
    let err = "utf-16".parse::<Encoding>().unwrap_err();
    assert_eq!(err, BufferError::UnsupportedEncoding("utf-16".to_string()));
    assert_eq!(err.to_string(), "unsupported encoding 'utf-16'");
}

#[test]
fn json_input_shapes() {
    let value: serde_json::Value = serde_json::from_str("[72, 105]").unwrap();
    let buf = ByteBuffer::new(BufferInput::from_json(&value, Encoding::Utf8).unwrap()).unwrap();
    assert_eq!(buf.to_string(), "Hi");

    let value: serde_json::Value = serde_json::from_str("true").unwrap();
    assert!(matches!(
        BufferInput::from_json(&value, Encoding::Utf8),
        Err(BufferError::InvalidInput(_))
    ));
}

#[test]
fn invalid_utf8_is_replaced() {
    let buf = ByteBuffer::from_bytes(&[0x48, 0xc3, 0x28]);
    assert_eq!(buf.to_string(), "H\u{fffd}(");
}
