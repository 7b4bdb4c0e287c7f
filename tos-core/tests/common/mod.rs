//! Builders for synthetic IES and IPF files.
#![allow(dead_code)]

use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

pub const KEY: u8 = 0x01;

pub fn xor(b: &[u8]) -> Vec<u8> {
    b.iter().map(|x| x ^ KEY).collect()
}

fn fixed(text: &str, len: usize) -> Vec<u8> {
    let mut b = xor(text.as_bytes());
    b.resize(len, 0);
    b
}

pub struct Col<'a> {
    pub name: &'a str,
    pub string: bool,
    pub order: u8,
}

pub fn int_col(name: &str, order: u8) -> Col<'_> {
    Col { name, string: false, order }
}

pub fn str_col(name: &str, order: u8) -> Col<'_> {
    Col { name, string: true, order }
}

/// Cells are given in sorted order: all ints first, then all strings.
pub struct RowSpec<'a> {
    pub ints: Vec<u32>,
    pub strs: Vec<&'a str>,
}

pub fn ies_bytes(name: &str, cols: &[Col], rows: &[RowSpec]) -> Vec<u8> {
    let ints = cols.iter().filter(|c| !c.string).count() as u16;
    let strs = cols.len() as u16 - ints;

    let mut col_sec = Vec::new();
    for c in cols {
        col_sec.extend(fixed(c.name, 64));
        col_sec.extend(fixed(&c.name.to_lowercase(), 64));
        col_sec.push(if c.string { 1 } else { 0 });
        col_sec.extend([0u8; 5]);
        col_sec.push(c.order);
        col_sec.push(0);
    }

    let mut row_sec = Vec::new();
    for (i, r) in rows.iter().enumerate() {
        row_sec.extend((i as u32).to_le_bytes());
        let opt = xor(b"opt");
        row_sec.extend((opt.len() as u16).to_le_bytes());
        row_sec.extend(opt);
        for v in &r.ints {
            row_sec.extend(v.to_le_bytes());
        }
        for s in &r.strs {
            let enc = xor(s.as_bytes());
            row_sec.extend((enc.len() as u16).to_le_bytes());
            row_sec.extend(enc);
        }
        row_sec.extend(vec![0u8; r.strs.len()]);
    }

    let size = (144 + 12 + col_sec.len() + row_sec.len()) as u32;
    let mut out = fixed(name, 128);
    out.extend(1u32.to_le_bytes());
    out.extend((col_sec.len() as u32).to_le_bytes());
    out.extend((row_sec.len() as u32).to_le_bytes());
    out.extend(size.to_le_bytes());
    for v in [1u16, rows.len() as u16, cols.len() as u16, ints, strs, 0] {
        out.extend(v.to_le_bytes());
    }
    out.extend(col_sec);
    out.extend(row_sec);
    out
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub struct EntrySpec<'a> {
    pub name: &'a str,
    pub comment: &'a str,
    /// Bytes stored in the archive.
    pub payload: Vec<u8>,
    pub uncompressed_size: u32,
    pub crc: u32,
}

/// Entry whose payload is `content` deflated.
pub fn packed<'a>(name: &'a str, content: &[u8]) -> EntrySpec<'a> {
    EntrySpec {
        name,
        comment: "",
        payload: deflate(content),
        uncompressed_size: content.len() as u32,
        crc: crc32fast::hash(content),
    }
}

/// Entry whose payload is `content` as-is.
pub fn stored<'a>(name: &'a str, content: &[u8]) -> EntrySpec<'a> {
    EntrySpec {
        name,
        comment: "",
        payload: content.to_vec(),
        uncompressed_size: content.len() as u32,
        crc: crc32fast::hash(content),
    }
}

/// Payloads, then the index, then the 24-byte trailer.
pub fn ipf_bytes(entries: &[EntrySpec]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut offsets = Vec::new();
    for e in entries {
        offsets.push(out.len() as u32);
        out.extend(&e.payload);
    }
    let index_offset = out.len() as u32;
    for (e, off) in entries.iter().zip(offsets) {
        out.extend((e.name.len() as u16).to_le_bytes());
        out.extend(e.crc.to_le_bytes());
        out.extend((e.payload.len() as u32).to_le_bytes());
        out.extend(e.uncompressed_size.to_le_bytes());
        out.extend(off.to_le_bytes());
        out.extend((e.comment.len() as u16).to_le_bytes());
        out.extend(e.comment.as_bytes());
        out.extend(e.name.as_bytes());
    }
    out.extend((entries.len() as u16).to_le_bytes());
    out.extend(index_offset.to_le_bytes());
    out.extend(0u16.to_le_bytes());
    out.extend([0u8; 16]);
    out
}
