use std::io;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CodecId {
    Store = 0,
    Deflate = 1,
}

impl CodecId {
    pub fn name(self) -> &'static str {
        match self {
            CodecId::Store => "store",
            CodecId::Deflate => "deflate",
        }
    }
}

/// Turns an entry payload back into file bytes.
pub trait Decompressor: Send + Sync {
    fn id(&self) -> CodecId;
    /// `size_hint` is the declared uncompressed size, used only to size buffers.
    fn decompress(&self, src: &[u8], size_hint: usize) -> io::Result<Vec<u8>>;
}

pub mod deflate;
pub mod store;

pub fn decoder_for(id: CodecId) -> &'static dyn Decompressor {
    match id {
        CodecId::Store => &store::Store,
        CodecId::Deflate => &deflate::RawDeflate,
    }
}
