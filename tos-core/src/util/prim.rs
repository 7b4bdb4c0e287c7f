//! Primitive readers shared by both decoders.

use crate::error::{Result, TosError};
use std::io::{self, Read, Seek};

/// Bytes treated as padding/control markers around obfuscated text.
pub const SENTINELS: [u8; 4] = [0, 1, 2, 3];

/// Decode a little-endian u16. The slice must hold at least 2 bytes.
#[inline]
pub fn read_u16_le(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

/// Decode a little-endian u32. The slice must hold at least 4 bytes.
#[inline]
pub fn read_u32_le(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

#[inline]
fn is_sentinel(b: &u8) -> bool {
    SENTINELS.contains(b)
}

/// Strip boundary sentinels, then XOR every remaining byte with `key`.
pub fn deobfuscate_text(raw: &[u8], key: u8) -> String {
    let start = raw.iter().position(|b| !is_sentinel(b)).unwrap_or(raw.len());
    let end = raw
        .iter()
        .rposition(|b| !is_sentinel(b))
        .map_or(start, |i| i + 1);
    let plain: Vec<u8> = raw[start..end].iter().map(|b| b ^ key).collect();
    String::from_utf8_lossy(&plain).into_owned()
}

/// XOR every byte with `key`. Inverse of the XOR half of [`deobfuscate_text`].
pub fn obfuscate(plain: &[u8], key: u8) -> Vec<u8> {
    plain.iter().map(|b| b ^ key).collect()
}

/// Fill `buf` from the current position, reporting a short read as a
/// truncated `what` record at that position.
pub fn read_record<R: Read + Seek>(r: &mut R, buf: &mut [u8], what: &'static str) -> Result<()> {
    let offset = r.stream_position()?;
    let need = buf.len();
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => TosError::Truncated { what, offset, need },
        _ => TosError::Io(e),
    })
}

/// Read a u16 length prefix followed by that many bytes.
pub fn read_prefixed<R: Read + Seek>(r: &mut R, what: &'static str) -> Result<Vec<u8>> {
    let mut len = [0u8; 2];
    read_record(r, &mut len, what)?;
    let mut data = vec![0u8; read_u16_le(&len) as usize];
    read_record(r, &mut data, what)?;
    Ok(data)
}

/// Borrow `len` bytes at `at` from an in-memory region that starts at file
/// offset `base`.
pub fn take<'a>(
    buf: &'a [u8],
    at: usize,
    len: usize,
    base: u64,
    what: &'static str,
) -> Result<&'a [u8]> {
    at.checked_add(len)
        .and_then(|end| buf.get(at..end))
        .ok_or(TosError::Truncated {
            what,
            offset: base + at as u64,
            need: len,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn little_endian_integers() {
        assert_eq!(read_u16_le(&[0x34, 0x12]), 0x1234);
        assert_eq!(read_u32_le(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
    }

    #[test]
    #[should_panic]
    fn undersized_slice_panics() {
        read_u32_le(&[1, 2, 3]);
    }

    #[test]
    fn deobfuscate_strips_sentinels_then_xors() {
        let mut raw = vec![0u8, 0, 3];
        raw.extend(obfuscate(b"ClassName", 0x01));
        raw.extend([1, 2, 0, 0, 0]);
        assert_eq!(deobfuscate_text(&raw, 0x01), "ClassName");
    }

    #[test]
    fn deobfuscate_keeps_interior_sentinels() {
        // 'a' ^ 1 = '`', interior 0x02 survives and becomes 0x03 after XOR
        let raw = [b'`', 0x02, b'`'];
        assert_eq!(deobfuscate_text(&raw, 0x01), "a\u{3}a");
    }

    #[test]
    fn deobfuscate_empty_and_all_padding() {
        assert_eq!(deobfuscate_text(&[], 0x01), "");
        assert_eq!(deobfuscate_text(&[0; 64], 0x01), "");
        assert_eq!(deobfuscate_text(&[3, 2, 1, 0], 0x01), "");
    }

    #[test]
    fn deobfuscate_honours_key() {
        let raw = obfuscate(b"zone", 0x5A);
        assert_eq!(deobfuscate_text(&raw, 0x5A), "zone");
    }

    #[test]
    fn sentinels_are_matched_before_xor_for_any_key() {
        // 'Z' ^ 0x5A = 0x00 and 'Y' ^ 0x5A = 0x03: both read as padding
        let raw = obfuscate(b"ZoneY", 0x5A);
        assert_eq!(raw[0], 0x00);
        assert_eq!(raw[4], 0x03);
        assert_eq!(deobfuscate_text(&raw, 0x5A), "one");

        // a raw 0x5A decodes to NUL but is not itself a sentinel
        assert_eq!(deobfuscate_text(&[0x5A, 0x35, 0x02], 0x5A), "\0o");
    }

    #[test]
    fn round_trip_strips_only_boundary_sentinels() {
        // with key 0x01 the sentinel set maps onto itself
        let plain = b"\x02mid\x01dle\x03";
        let got = deobfuscate_text(&obfuscate(plain, 0x01), 0x01);
        assert_eq!(got.as_bytes(), b"mid\x01dle");

        let edge = [0x01u8, b'x'];
        assert_eq!(deobfuscate_text(&obfuscate(&edge, 0x01), 0x01), "x");
    }

    #[test]
    fn read_record_reports_truncation() {
        let mut c = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 2];
        read_record(&mut c, &mut buf, "sample").unwrap();
        let err = read_record(&mut c, &mut buf, "sample").unwrap_err();
        match err {
            TosError::Truncated { what, offset, need } => {
                assert_eq!(what, "sample");
                assert_eq!(offset, 2);
                assert_eq!(need, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_prefixed_reads_length_then_body() {
        let mut c = Cursor::new(vec![3u8, 0, b'a', b'b', b'c', 0xFF]);
        assert_eq!(read_prefixed(&mut c, "cell").unwrap(), b"abc");
        assert_eq!(c.position(), 5);
    }

    #[test]
    fn take_bounds() {
        let buf = [0u8; 8];
        assert_eq!(take(&buf, 2, 4, 100, "x").unwrap().len(), 4);
        match take(&buf, 6, 4, 100, "x") {
            Err(TosError::Truncated { offset, need, .. }) => {
                assert_eq!(offset, 106);
                assert_eq!(need, 4);
            }
            _ => panic!("expected truncation"),
        }
    }
}
