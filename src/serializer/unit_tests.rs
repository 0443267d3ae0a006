use std::io::{Cursor, ErrorKind};

use crate::serializer::{Deserializer, Serializer};

#[test]
fn test_string_layout() {
    let mut serializer = Serializer::new(Vec::new());
    serializer.put_string("CV").unwrap();
    serializer.put_byte_array(&[1, 2, 3]).unwrap();

    assert_eq!(
        vec![2, 0, 0, 0, b'C', b'V', 1, 2, 3],
        serializer.into_inner()
    );
}

#[test]
fn test_read_back() {
    let mut deserializer = Deserializer::new(Cursor::new(vec![3, 0, 0, 0, b'a', b'b', b'c', 9, 8]));

    assert_eq!("abc", deserializer.get_string().unwrap());
    let mut bytes = [0; 2];
    deserializer.get_byte_array(&mut bytes).unwrap();
    assert_eq!([9, 8], bytes);
}

#[test]
fn test_short_stream() {
    let mut deserializer = Deserializer::new(Cursor::new(vec![4, 0, 0, 0, b'a']));

    assert_eq!(
        ErrorKind::UnexpectedEof,
        deserializer.get_string().unwrap_err().kind()
    );
}

#[test]
fn test_absurd_length() {
    let mut deserializer = Deserializer::new(Cursor::new(vec![0xFF, 0xFF, 0xFF, 0xFF]));

    assert_eq!(
        ErrorKind::InvalidData,
        deserializer.get_string().unwrap_err().kind()
    );
}

#[test]
fn test_bad_utf8() {
    let mut deserializer = Deserializer::new(Cursor::new(vec![1, 0, 0, 0, 0xFF]));

    assert_eq!(
        ErrorKind::InvalidData,
        deserializer.get_string().unwrap_err().kind()
    );
}
