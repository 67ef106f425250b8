use reproca_pack::constants::*;
use reproca_pack::{
    decode, encode, encode_with, Decoder, EncoderOptions, KeyMode, PackError, Value,
};

fn obj(fields: &[(&str, Value)]) -> Value {
    Value::object(fields.iter().map(|(k, v)| (*k, v.clone())))
}

fn samples() -> Vec<Value> {
    vec![
        Value::Unit,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(0),
        Value::Int(1),
        Value::Int(-1),
        Value::Int(i64::MAX),
        Value::Int(i64::MIN),
        Value::Float(0.0),
        Value::Float(1.1),
        Value::Float(-12_321.321_123),
        Value::Float(f64::INFINITY),
        Value::Float(f64::MIN_POSITIVE),
        Value::from(""),
        Value::from("abc123"),
        Value::from("...................🎉....................."),
        Value::bytes(vec![]),
        Value::bytes(vec![0, 1, 2, 0]),
        Value::List(vec![]),
        Value::list([Value::Int(1)]),
        Value::list([
            Value::Int(0),
            Value::Float(1.32),
            Value::from("str"),
            Value::Bool(true),
            Value::Bool(false),
            Value::Unit,
            Value::list([1i64, 2, 3]),
        ]),
        obj(&[]),
        obj(&[("foo", Value::from("bar"))]),
        obj(&[
            ("", Value::Unit),
            ("null", Value::Bool(false)),
            ("true", Value::Bool(true)),
            ("str", Value::from("asdfasdf ,asdf asdf asdf asdf asdf, asdflkasjdflak")),
            ("num", Value::Int(123)),
            ("arr", Value::list([1i64, 2, 3])),
            ("obj", obj(&[("foo", Value::from("bar"))])),
            ("bin", Value::bytes(vec![0xde, 0xad])),
        ]),
        Value::list([obj(&[("a", Value::List(vec![]))]), obj(&[])]),
    ]
}

#[test]
fn roundtrip_matrix() {
    for value in samples() {
        let bytes = encode(&value).expect("encode");
        let (back, consumed) = decode(&bytes).expect("decode");
        assert_eq!(back, value);
        assert_eq!(consumed, bytes.len(), "{value:?}");
        assert_eq!(consumed, value.encoded_len(), "{value:?}");
    }
}

#[test]
fn scenario_a_user_record() {
    let user = obj(&[
        ("ID", Value::Int(0)),
        ("NAME", Value::from("aspizu")),
        ("ADMN", Value::Bool(true)),
    ]);
    let bytes = encode(&user).unwrap();
    assert_eq!(bytes[0], TAG_OBJECT);
    // 3 key slots + int + "aspizu\0" text + bool
    assert_eq!(&bytes[1..9], &(12u64 + 9 + 8 + 1).to_le_bytes());
    assert_eq!(decode(&bytes).unwrap(), (user, bytes.len()));
}

#[test]
fn scenario_b_int_list() {
    let bytes = encode(&Value::list([1i64, 2, 3])).unwrap();
    assert_eq!(&bytes[1..9], &27u64.to_le_bytes());
    let (value, consumed) = decode(&bytes).unwrap();
    assert_eq!(value, Value::list([1i64, 2, 3]));
    assert_eq!(consumed, 36);
}

#[test]
fn scenario_c_empty_text() {
    let bytes = encode(&Value::from("")).unwrap();
    assert_eq!(bytes, vec![0x06, 0x00]);
    assert_eq!(decode(&bytes).unwrap().1, 2);
}

#[test]
fn scenario_d_unit() {
    let bytes = encode(&Value::Unit).unwrap();
    assert_eq!(bytes, vec![0x01]);
    assert_eq!(decode(&bytes).unwrap().1, 1);
}

#[test]
fn consumed_widths_per_tag() {
    let cases: Vec<(Value, usize)> = vec![
        (Value::Unit, 1),
        (Value::Bool(true), 1),
        (Value::Bool(false), 1),
        (Value::Int(5), 9),
        (Value::Float(5.0), 9),
        (Value::from("abcd"), 4 + 2),
        (Value::bytes(vec![9; 10]), 9 + 10),
    ];
    for (value, width) in cases {
        let bytes = encode(&value).unwrap();
        assert_eq!(decode(&bytes).unwrap().1, width, "{value:?}");
    }
}

/// Walks a container body child by child and checks that the children's
/// consumed counts add up to the declared size.
fn assert_children_fill_body(bytes: &[u8]) {
    let tag = bytes[0];
    if tag != TAG_LIST && tag != TAG_OBJECT {
        return;
    }
    let size = u64::from_le_bytes(bytes[1..9].try_into().unwrap()) as usize;
    assert_eq!(bytes.len(), CONTAINER_HEADER_LEN + size);
    let body = &bytes[CONTAINER_HEADER_LEN..];
    let mut offset = 0;
    while offset < size {
        if tag == TAG_OBJECT {
            offset += KEY_SLOT_LEN;
        }
        let (_, consumed) = decode(&body[offset..]).unwrap();
        assert_children_fill_body(&body[offset..offset + consumed]);
        offset += consumed;
    }
    assert_eq!(offset, size);
}

#[test]
fn size_exactness_matrix() {
    for value in samples() {
        assert_children_fill_body(&encode(&value).unwrap());
    }
}

#[test]
fn truncation_matrix() {
    for value in samples() {
        let bytes = encode(&value).unwrap();
        for n in 1..bytes.len() {
            let cut = &bytes[..bytes.len() - n];
            match decode(cut) {
                Err(PackError::TruncatedOrCorrupt { .. }) => {}
                other => panic!("{value:?} cut by {n}: {other:?}"),
            }
        }
    }
}

#[test]
fn key_collision_keeps_later_value() {
    let value = obj(&[("NAMEA", Value::Int(1)), ("NAMEB", Value::Int(2))]);
    let bytes = encode(&value).unwrap();
    let (back, consumed) = decode(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(back, obj(&[("NAME", Value::Int(2))]));
}

#[test]
fn collision_with_exact_four_byte_key() {
    let value = obj(&[("ADMN", Value::Bool(false)), ("ADMNX", Value::Bool(true))]);
    let back = decode(&encode(&value).unwrap()).unwrap().0;
    assert_eq!(back.as_object().unwrap().len(), 1);
    assert_eq!(back.get("ADMN"), Some(&Value::Bool(true)));
}

#[test]
fn long_keys_truncate_by_default() {
    let bytes = encode(&obj(&[("username", Value::Unit)])).unwrap();
    assert_eq!(decode(&bytes).unwrap().0, obj(&[("user", Value::Unit)]));
}

#[test]
fn strict_key_mode() {
    let strict = EncoderOptions {
        key_mode: KeyMode::Strict,
    };
    assert_eq!(
        encode_with(&obj(&[("username", Value::Unit)]), strict),
        Err(PackError::KeyTooLong("username".into()))
    );
    assert_eq!(
        encode_with(&obj(&[("a\0", Value::Unit)]), strict),
        Err(PackError::NonAsciiKey("a\0".into()))
    );
    assert!(encode_with(&obj(&[("user", Value::Unit)]), strict).is_ok());
}

#[test]
fn nested_failure_returns_no_bytes() {
    let value = Value::list([
        Value::Int(1),
        obj(&[("ok", Value::Unit), ("ключ", Value::Unit)]),
    ]);
    assert_eq!(encode(&value), Err(PackError::NonAsciiKey("ключ".into())));
}

#[test]
fn unknown_tags_are_rejected() {
    for tag in [0x00u8, 0x0a, 0x10, 0x80, 0xff] {
        assert_eq!(
            decode(&[tag]),
            Err(PackError::UnknownTag { tag, offset: 0 })
        );
    }
}

#[test]
fn declared_size_larger_than_input() {
    let mut bytes = encode(&Value::list([1i64])).unwrap();
    bytes[1] = 10;
    assert!(matches!(
        decode(&bytes),
        Err(PackError::TruncatedOrCorrupt { .. })
    ));
}

#[test]
fn declared_size_smaller_than_children() {
    let mut bytes = encode(&Value::list([1i64, 2])).unwrap();
    bytes[1] = 10;
    assert!(matches!(
        decode(&bytes),
        Err(PackError::TruncatedOrCorrupt { .. })
    ));
}

#[test]
fn decoder_reads_a_sequence() {
    let mut data = encode(&Value::Int(7)).unwrap();
    data.extend(encode(&Value::from("x")).unwrap());
    data.extend(encode(&Value::list([Value::Unit])).unwrap());
    let mut decoder = Decoder::new(&data);
    let mut seen = Vec::new();
    while decoder.remaining() > 0 {
        seen.push(decoder.read_any().unwrap());
    }
    assert_eq!(
        seen,
        vec![
            (Value::Int(7), 9),
            (Value::from("x"), 3),
            (Value::list([Value::Unit]), 10),
        ]
    );
}

#[test]
fn float_bits_survive() {
    for f in [-0.0f64, f64::NEG_INFINITY, 5e-324] {
        let bytes = encode(&Value::Float(f)).unwrap();
        match decode(&bytes).unwrap().0 {
            Value::Float(back) => assert_eq!(back.to_bits(), f.to_bits()),
            other => panic!("{other:?}"),
        }
    }
    let bytes = encode(&Value::Float(f64::NAN)).unwrap();
    assert!(decode(&bytes).unwrap().0.as_f64().unwrap().is_nan());
}
