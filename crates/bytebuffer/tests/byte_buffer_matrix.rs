//! Accessor and region-operation matrix for `ByteBuffer`.

#![cfg(all(feature = "int64", feature = "strings"))]

use bytebuffer::{BufferError, ByteBuffer, ByteBufferConfig, Endianness, StringLength};

fn little(capacity: usize) -> ByteBuffer {
    ByteBuffer::with_config(
        ByteBufferConfig::default()
            .with_capacity(capacity)
            .little_endian(),
    )
    .unwrap()
}

fn strict(capacity: usize) -> ByteBuffer {
    ByteBuffer::with_config(
        ByteBufferConfig::default()
            .with_capacity(capacity)
            .with_assertions(true),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Byte layout scenarios
// ---------------------------------------------------------------------------

#[test]
fn uint32_big_endian_bytes() {
    let mut bb = ByteBuffer::allocate(4).unwrap();
    bb.write_u32_at(0x01020304, 0).unwrap();
    assert_eq!(bb.as_slice(), &[0x01, 0x02, 0x03, 0x04]);
}

#[test]
fn uint32_little_endian_bytes() {
    let mut bb = little(4);
    bb.write_u32_at(0x01020304, 0).unwrap();
    assert_eq!(bb.as_slice(), &[0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn varint32_300_bytes() {
    let mut bb = ByteBuffer::new();
    bb.write_varint32(300).unwrap();
    bb.flip();
    assert_eq!(bb.to_bytes(), vec![0xAC, 0x02]);
}

#[test]
fn vstring_hi_bytes() {
    let mut bb = ByteBuffer::new();
    bb.write_vstring("hi").unwrap();
    bb.flip();
    assert_eq!(bb.to_bytes(), vec![0x02, 0x68, 0x69]);
}

#[test]
fn cstring_stops_at_nul() {
    let mut bb = ByteBuffer::from_bytes(vec![0x61, 0x62, 0x00, 0x63]);
    assert_eq!(bb.read_cstring().unwrap(), "ab");
    assert_eq!(bb.offset(), 3);
}

#[test]
fn mark_write_reset() {
    let mut bb = ByteBuffer::new();
    bb.skip(2).unwrap();
    bb.mark();
    bb.append(&[1, 2, 3]).unwrap();
    assert_eq!(bb.offset(), 5);
    bb.reset().unwrap();
    assert_eq!(bb.offset(), 2);
}

// ---------------------------------------------------------------------------
// Numeric roundtrips under both byte orders
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_all_widths_both_orders() {
    for order in [Endianness::Big, Endianness::Little] {
        let mut bb = ByteBuffer::allocate(1).unwrap();
        bb.set_order(order);
        bb.write_u8(0xFF).unwrap();
        bb.write_i8(i8::MIN).unwrap();
        bb.write_u16(0xBEEF).unwrap();
        bb.write_i16(-1000).unwrap();
        bb.write_u32(0xDEADBEEF).unwrap();
        bb.write_i32(-123_456).unwrap();
        bb.write_f32(1.5).unwrap();
        bb.write_f64(std::f64::consts::PI).unwrap();
        bb.write_int64(-9_876_543_210).unwrap();
        bb.write_uint64(u64::MAX - 1).unwrap();
        bb.flip();
        assert_eq!(bb.read_u8().unwrap(), 0xFF);
        assert_eq!(bb.read_i8().unwrap(), i8::MIN);
        assert_eq!(bb.read_u16().unwrap(), 0xBEEF);
        assert_eq!(bb.read_i16().unwrap(), -1000);
        assert_eq!(bb.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(bb.read_i32().unwrap(), -123_456);
        assert_eq!(bb.read_f32().unwrap(), 1.5);
        assert_eq!(bb.read_f64().unwrap(), std::f64::consts::PI);
        assert_eq!(bb.read_int64().unwrap(), -9_876_543_210);
        assert_eq!(bb.read_uint64().unwrap(), u64::MAX - 1);
        assert_eq!(bb.remaining(), 0);
    }
}

#[test]
fn mixed_order_per_call() {
    let mut bb = ByteBuffer::allocate(4).unwrap();
    bb.write_value(0x0102u16, Some(0), Some(Endianness::Little))
        .unwrap();
    bb.write_value(0x0304u16, Some(2), None).unwrap();
    assert_eq!(bb.as_slice(), &[0x02, 0x01, 0x03, 0x04]);
}

// ---------------------------------------------------------------------------
// Bounds and assertion mode
// ---------------------------------------------------------------------------

#[test]
fn absolute_write_past_capacity_fails_in_both_modes() {
    for assertions in [false, true] {
        let mut bb = ByteBuffer::allocate(2).unwrap();
        bb.set_assertions(assertions);
        assert!(matches!(
            bb.write_u32_at(0, 0),
            Err(BufferError::OutOfBounds { .. })
        ));
        assert!(bb.write_u16_at(0, usize::MAX).is_err());
        assert_eq!(bb.capacity(), 2);
    }
}

#[test]
fn strict_read_past_limit_fails() {
    let mut bb = strict(8);
    bb.write_u16(7).unwrap();
    bb.flip();
    assert_eq!(
        bb.read_u32_at(0).unwrap_err(),
        BufferError::OutOfBounds {
            offset: 0,
            len: 4,
            bound: 2
        }
    );
    assert_eq!(bb.read_u16().unwrap(), 7);
}

#[test]
fn range_error_only_with_assertions() {
    let mut bb = strict(4);
    assert!(matches!(
        bb.write_int_as::<u8>(256, None),
        Err(BufferError::Range { value: 256, ty: "u8" })
    ));
    bb.set_assertions(false);
    bb.write_int_as::<u8>(256, None).unwrap();
    assert_eq!(bb.read_u8_at(0).unwrap(), 0);
}

#[test]
fn reset_without_mark_is_invalid_state() {
    let mut bb = ByteBuffer::new();
    assert!(matches!(bb.reset(), Err(BufferError::InvalidState(_))));
}

// ---------------------------------------------------------------------------
// Growth and regions
// ---------------------------------------------------------------------------

#[test]
fn growth_preserves_written_bytes() {
    let mut bb = ByteBuffer::allocate(4).unwrap();
    bb.append(&[1, 2, 3]).unwrap();
    bb.append(&[9; 40]).unwrap();
    assert_eq!(bb.capacity(), 64);
    assert_eq!(&bb.as_slice()[..3], &[1, 2, 3]);
}

#[test]
fn flip_then_read_reproduces_writes() {
    let mut bb = ByteBuffer::new();
    bb.write_u8(1).unwrap();
    bb.write_utf8_string("xyz").unwrap();
    let written = bb.offset();
    bb.flip();
    assert_eq!(bb.read_bytes(written).unwrap(), &[1, b'x', b'y', b'z']);
}

#[test]
fn slice_and_copy_are_independent() {
    let mut bb = ByteBuffer::from_bytes(vec![1, 2, 3, 4]);
    let slice = bb.slice(1, 3).unwrap();
    let copy = bb.copy(1, 3).unwrap();
    bb.write_u8_at(0xEE, 1).unwrap();
    assert_eq!(slice.to_bytes(), vec![2, 3]);
    assert_eq!(copy, vec![2, 3]);
    assert!(matches!(
        bb.slice(2, 1),
        Err(BufferError::OutOfBounds { .. })
    ));
}

#[test]
fn compact_then_append() {
    let mut bb = ByteBuffer::new();
    bb.append(&[1, 2, 3, 4]).unwrap();
    bb.flip();
    bb.read_u16().unwrap();
    bb.compact(None, None).unwrap();
    assert_eq!(bb.capacity(), 2);
    assert_eq!((bb.offset(), bb.limit()), (0, 2));
    assert_eq!(bb.as_slice(), &[3, 4]);
}

#[test]
fn reverse_for_endianness_swap() {
    let mut bb = ByteBuffer::allocate(4).unwrap();
    bb.write_u32(0x01020304).unwrap();
    bb.flip();
    bb.reverse(None, None).unwrap();
    assert_eq!(bb.read_u32_at(0).unwrap(), 0x04030201);
}

#[test]
fn prepend_header_to_payload() {
    let mut bb = ByteBuffer::new();
    bb.write_utf8_string("payload").unwrap();
    bb.flip();
    bb.prepend(&[7], None).unwrap();
    assert_eq!(bb.to_bytes(), b"\x07payload".to_vec());
}

#[test]
fn wrap_keeps_config() {
    let config = ByteBufferConfig::default().little_endian();
    let bb = ByteBuffer::wrap(vec![1, 0], config);
    assert_eq!(bb.read_u16_at(0).unwrap(), 1);
    assert_eq!(bb.capacity(), 2);
}

#[test]
fn bytes_roundtrip_keeps_cursor_state() {
    let mut bb = ByteBuffer::new();
    bb.write_u32(5).unwrap();
    let raw = bb.as_slice().to_vec();
    assert_eq!(bb.offset(), 4);
    let copy = ByteBuffer::from_bytes(raw.clone());
    assert_eq!(copy.into_inner(), raw);
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

#[test]
fn string_records_roundtrip() {
    let mut bb = ByteBuffer::new();
    bb.write_cstring("c\u{e9}").unwrap();
    bb.write_vstring("v\u{1F600}").unwrap();
    bb.write_utf8_string("tail").unwrap();
    bb.flip();
    assert_eq!(bb.read_cstring().unwrap(), "c\u{e9}");
    assert_eq!(bb.read_vstring().unwrap(), "v\u{1F600}");
    assert_eq!(bb.read_utf8_string(StringLength::Chars(4)).unwrap(), "tail");
}

#[test]
fn unpaired_continuation_rejected() {
    let mut bb = ByteBuffer::from_bytes(vec![0x41, 0xBF]);
    assert!(matches!(
        bb.read_utf8_string(StringLength::Bytes(2)),
        Err(BufferError::InvalidEncoding { offset: 1, .. })
    ));
}

#[test]
fn vstring_absolute() {
    let mut bb = ByteBuffer::allocate(8).unwrap();
    assert_eq!(bb.write_vstring_at("abc", 2).unwrap(), 4);
    assert_eq!(bb.read_vstring_at(2).unwrap(), ("abc".to_string(), 4));
    assert_eq!(bb.offset(), 0);
}
