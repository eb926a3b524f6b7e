use crate::{from_slice, ErrorKind};

#[test]
fn garbage_headers() {
    for input in [
        &b""[..],
        b"x",
        b":)",
        b":(\n\x03\x21",
        b"\x3a\x29\x0b\x03\x21",
        b"{\"json\":true}",
    ] {
        assert!(matches!(
            from_slice(input).unwrap_err().kind(),
            ErrorKind::InvalidHeader,
        ));
    }
}

#[test]
fn truncated_header() {
    assert!(matches!(
        from_slice(b":)\n").unwrap_err().kind(),
        ErrorKind::UnexpectedEndOfInput,
    ));
}

#[test]
fn empty_body() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03]).unwrap_err().kind(),
        ErrorKind::UnexpectedEndOfInput,
    ));
}

#[test]
fn truncated_numbers() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x24, 0x00]).unwrap_err().kind(),
        ErrorKind::IncompleteInt32,
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x25, 0x00, 0x00, 0x00])
            .unwrap_err()
            .kind(),
        ErrorKind::IncompleteInt64,
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x28, 0x3f]).unwrap_err().kind(),
        ErrorKind::IncompleteFloat32,
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x29, 0x3f, 0x80]).unwrap_err().kind(),
        ErrorKind::IncompleteFloat64,
    ));
}

#[test]
fn truncated_strings() {
    // token 0x44 declares five bytes
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x44, 0x61, 0x62]).unwrap_err().kind(),
        ErrorKind::IncompleteString,
    ));
    // long form whose declared length exceeds the input
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xe0, 0x50, 0x61]).unwrap_err().kind(),
        ErrorKind::IncompleteString,
    ));
}

#[test]
fn missing_terminators() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xe0, 0x01, 0x61]).unwrap_err().kind(),
        ErrorKind::MissingStringTerminator,
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xfa, 0x34, 0x01, 0x61])
            .unwrap_err()
            .kind(),
        ErrorKind::MissingFieldNameTerminator,
    ));
}

#[test]
fn bad_vints() {
    // continuation bit set at the end of the input
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xe0, 0x80]).unwrap_err().kind(),
        ErrorKind::IncompleteVInt,
    ));
    // continuation bits that never terminate
    let mut bytes = vec![0x3a, 0x29, 0x0a, 0x03, 0xe0];
    bytes.extend_from_slice(&[0x80; 12]);
    assert!(matches!(
        from_slice(&bytes).unwrap_err().kind(),
        ErrorKind::IncompleteVInt,
    ));
}

#[test]
fn unknown_tokens() {
    for token in [0x00, 0x26, 0x2a, 0x3b, 0xe8, 0xfd, 0xfe] {
        let err = from_slice(&[0x3a, 0x29, 0x0a, 0x03, token]).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::UnknownToken(t) if *t == token),
            "token 0x{:02x} gave {:?}",
            token,
            err,
        );
    }
}

#[test]
fn unknown_key_tokens() {
    for token in [0x00, 0x21, 0x31, 0x35, 0x3f] {
        let err = from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xfa, token]).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::UnknownKeyToken(t) if *t == token),
            "key token 0x{:02x} gave {:?}",
            token,
            err,
        );
    }
}

#[test]
fn invalid_shared_references() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x01]).unwrap_err().kind(),
        ErrorKind::InvalidSharedReference(0),
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xec, 0x00]).unwrap_err().kind(),
        ErrorKind::InvalidSharedReference(31),
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xfa, 0x40]).unwrap_err().kind(),
        ErrorKind::InvalidSharedReference(0),
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xfa, 0x30, 0x00, 0x05])
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidSharedReference(5),
    ));
    // references are invalid when the header never enabled the tables
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x00, 0x01]).unwrap_err().kind(),
        ErrorKind::InvalidSharedReference(0),
    ));
}

#[test]
fn truncated_shared_references() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xec]).unwrap_err().kind(),
        ErrorKind::IncompleteSharedReference,
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xfa, 0x30, 0x00])
            .unwrap_err()
            .kind(),
        ErrorKind::IncompleteSharedNameReference,
    ));
}

#[test]
fn unclosed_containers() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xf8, 0xc1]).unwrap_err().kind(),
        ErrorKind::UnexpectedEndOfInput,
    ));
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0xfa]).unwrap_err().kind(),
        ErrorKind::UnexpectedEndOfInput,
    ));
}

#[test]
fn trailing_data() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x21, 0x21]).unwrap_err().kind(),
        ErrorKind::TrailingData,
    ));
}

#[test]
fn invalid_utf8() {
    assert!(matches!(
        from_slice(&[0x3a, 0x29, 0x0a, 0x03, 0x41, 0xc3, 0x28]).unwrap_err().kind(),
        ErrorKind::InvalidUtf8,
    ));
}

#[test]
fn recursion_limit() {
    let mut bytes = vec![0x3a, 0x29, 0x0a, 0x03];
    bytes.extend_from_slice(&[0xf8; 150]);
    assert!(matches!(
        from_slice(&bytes).unwrap_err().kind(),
        ErrorKind::RecursionLimitExceeded,
    ));
}
