use std::borrow::Cow;

use heed::{BoxedError, BytesDecode, BytesEncode};

// Sort key of the schedule table. Smaller score means more urgent; the hash
// breaks ties and doubles as the PageDb lookup key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleKey {
    pub score: f32,
    pub hash: u64,
}

impl ScheduleKey {
    pub const ENCODED_SIZE: usize = 12;

    // Virtual-time advance after a dequeue: one nominal period.
    pub fn advance(&mut self, freq: f32) {
        self.score += 1.0 / freq;
    }
}

// The schedule database relies on LMDB's default bytewise comparator, so the
// encoding must make bytewise order equal ascending (score, hash): f32 bits
// sign-flipped and big-endian (total order over finite floats), hash
// big-endian.
pub enum ScheduleKeyCodec {}

fn score_to_ordered_bits(score: f32) -> u32 {
    let bits = score.to_bits();
    if bits & 0x8000_0000 == 0 {
        bits ^ 0x8000_0000
    } else {
        !bits
    }
}

fn score_from_ordered_bits(ordered: u32) -> f32 {
    let bits = if ordered & 0x8000_0000 != 0 {
        ordered ^ 0x8000_0000
    } else {
        !ordered
    };
    f32::from_bits(bits)
}

impl<'a> BytesEncode<'a> for ScheduleKeyCodec {
    type EItem = ScheduleKey;

    fn bytes_encode(item: &'a Self::EItem) -> Result<Cow<'a, [u8]>, BoxedError> {
        let mut buf = [0u8; ScheduleKey::ENCODED_SIZE];
        buf[..4].copy_from_slice(&score_to_ordered_bits(item.score).to_be_bytes());
        buf[4..].copy_from_slice(&item.hash.to_be_bytes());
        Ok(Cow::Owned(buf.to_vec()))
    }
}

impl<'a> BytesDecode<'a> for ScheduleKeyCodec {
    type DItem = ScheduleKey;

    fn bytes_decode(bytes: &'a [u8]) -> Result<Self::DItem, BoxedError> {
        let raw: [u8; ScheduleKey::ENCODED_SIZE] = bytes
            .try_into()
            .map_err(|_| format!("schedule key must be {} bytes", ScheduleKey::ENCODED_SIZE))?;

        let score_bits: [u8; 4] = raw[..4].try_into().unwrap();
        let hash_bits: [u8; 8] = raw[4..].try_into().unwrap();

        Ok(ScheduleKey {
            score: score_from_ordered_bits(u32::from_be_bytes(score_bits)),
            hash: u64::from_be_bytes(hash_bits),
        })
    }
}

// Schedule values are a single f32: the requested crawls per second.
pub enum FreqCodec {}

impl<'a> BytesEncode<'a> for FreqCodec {
    type EItem = f32;

    fn bytes_encode(item: &'a Self::EItem) -> Result<Cow<'a, [u8]>, BoxedError> {
        Ok(Cow::Owned(item.to_le_bytes().to_vec()))
    }
}

impl<'a> BytesDecode<'a> for FreqCodec {
    type DItem = f32;

    fn bytes_decode(bytes: &'a [u8]) -> Result<Self::DItem, BoxedError> {
        let raw: [u8; 4] = bytes
            .try_into()
            .map_err(|_| "schedule value must be 4 bytes".to_owned())?;
        Ok(f32::from_le_bytes(raw))
    }
}
