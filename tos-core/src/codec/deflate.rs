use super::{CodecId, Decompressor};
use flate2::read::DeflateDecoder;
use std::io::{self, Read};

/// Upper bound on the up-front buffer; larger outputs grow as they inflate.
const PREALLOC_LIMIT: usize = 16 << 20;

/// Raw deflate stream, no zlib or gzip framing.
pub struct RawDeflate;

impl Decompressor for RawDeflate {
    fn id(&self) -> CodecId {
        CodecId::Deflate
    }

    fn decompress(&self, src: &[u8], size_hint: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(size_hint.min(PREALLOC_LIMIT));
        DeflateDecoder::new(src).read_to_end(&mut out)?;
        Ok(out)
    }
}
