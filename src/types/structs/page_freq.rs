use crate::utils::mmap::Record;

// One row of an externally supplied frequency table: requested crawls per
// second for a page hash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFreq {
    pub hash: u64,
    pub freq: f32,
}

impl Record for PageFreq {
    const SIZE: usize = 12;

    fn write_to(&self, buf: &mut [u8]) {
        buf[..8].copy_from_slice(&self.hash.to_le_bytes());
        buf[8..12].copy_from_slice(&self.freq.to_le_bytes());
    }

    fn read_from(buf: &[u8]) -> Self {
        Self {
            hash: u64::from_le_bytes(buf[..8].try_into().unwrap()),
            freq: f32::from_le_bytes(buf[8..12].try_into().unwrap()),
        }
    }
}
