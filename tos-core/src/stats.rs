use crate::codec::CodecId;

/// Tally of one archive extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub written: u64,
    pub inflated: u64,
    pub passthrough: u64,
    pub skipped: u64,
    pub bytes_written: u64,
}

impl ExtractStats {
    pub fn record(&mut self, codec: CodecId, bytes: u64) {
        self.written += 1;
        self.bytes_written += bytes;
        match codec {
            CodecId::Store => self.passthrough += 1,
            CodecId::Deflate => self.inflated += 1,
        }
    }
}
