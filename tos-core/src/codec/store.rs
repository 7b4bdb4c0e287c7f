use super::{CodecId, Decompressor};
use std::io;

/// Payload is already the file content.
pub struct Store;

impl Decompressor for Store {
    fn id(&self) -> CodecId {
        CodecId::Store
    }

    fn decompress(&self, src: &[u8], _size_hint: usize) -> io::Result<Vec<u8>> {
        Ok(src.to_vec())
    }
}
