//! Frame codec for the bridge link.
//!
//! Frame format:
//! - SYNC (1 byte): 0x7E
//! - LENGTH (1 byte): payload length (0-240)
//! - KIND (1 byte): message kind
//! - PAYLOAD (LENGTH bytes)
//! - XOR (1 byte): XOR of LENGTH, KIND and every payload byte

use heapless::Vec;

/// Frame synchronization byte
pub const LINK_SYNC: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 240;

/// Bytes a frame adds around its payload
pub const FRAME_OVERHEAD: usize = 4;

/// Largest encoded frame
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// Errors raised while building, encoding or parsing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload longer than [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Trailing XOR byte did not match
    BadChecksum,
    /// Length byte out of range or payload malformed for its kind
    Malformed,
    /// Kind byte is not a known message
    UnknownKind(u8),
    /// Output buffer cannot hold the encoded frame
    BufferTooSmall,
}

/// A single link frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message kind
    pub kind: u8,
    /// Raw payload
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Build a frame from a kind and payload bytes
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Build a frame without payload
    pub fn bare(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, kind: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ kind, |acc, &b| acc ^ b)
    }

    /// Length of this frame once encoded
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Encode into `out`, returning the number of bytes written
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let total = self.encoded_len();
        if out.len() < total {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let body_end = 3 + self.payload.len();
        out[0] = LINK_SYNC;
        out[1] = length;
        out[2] = self.kind;
        out[3..body_end].copy_from_slice(&self.payload);
        out[body_end] = Self::checksum(length, self.kind, &self.payload);

        Ok(total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Kind,
    Payload,
    Checksum,
}

/// Incremental frame decoder
///
/// Bytes preceding a SYNC byte are skipped, so the parser recovers on its
/// own after line noise or a partially received frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    length: u8,
    kind: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            stage: Stage::Sync,
            length: 0,
            kind: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next SYNC byte
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.length = 0;
        self.kind = 0;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` once a frame completes. On error the parser
    /// has already resynchronized and can keep being fed.
    pub fn push(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Sync => {
                if byte == LINK_SYNC {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::Malformed);
                }
                self.length = byte;
                self.stage = Stage::Kind;
            }
            Stage::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.stage = if self.length == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Capacity is guaranteed by the length check above
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let expected = Frame::checksum(self.length, self.kind, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::BadChecksum);
                }
                let frame = Frame {
                    kind: self.kind,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        let mut parser = FrameParser::new();
        for &b in bytes {
            if let Some(frame) = parser.push(b)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    #[test]
    fn test_bare_frame_layout() {
        let mut buf = [0u8; 8];
        let len = Frame::bare(0x22).encode(&mut buf).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buf[..4], &[LINK_SYNC, 0, 0x22, 0x22]);
    }

    #[test]
    fn test_payload_frame_checksum() {
        let frame = Frame::new(0x03, &[0x01, 0x02, 0x04]).unwrap();
        let mut buf = [0u8; 16];
        let len = frame.encode(&mut buf).unwrap();

        assert_eq!(len, 7);
        assert_eq!(buf[1], 3);
        assert_eq!(buf[6], 3 ^ 0x03 ^ 0x01 ^ 0x02 ^ 0x04);
    }

    #[test]
    fn test_parser_skips_noise_before_sync() {
        let mut buf = [0u8; 16];
        let len = Frame::new(0x01, &[9]).unwrap().encode(&mut buf).unwrap();

        let mut stream = heapless::Vec::<u8, 32>::new();
        stream.extend_from_slice(&[0x00, 0x13, 0xFF]).unwrap();
        stream.extend_from_slice(&buf[..len]).unwrap();

        let frame = decode_all(&stream).unwrap().unwrap();
        assert_eq!(frame.kind, 0x01);
        assert_eq!(&frame.payload[..], &[9]);
    }

    #[test]
    fn test_parser_rejects_bad_checksum_then_recovers() {
        let mut buf = [0u8; 16];
        let len = Frame::bare(0x01).encode(&mut buf).unwrap();

        let mut parser = FrameParser::new();
        let mut corrupted = buf;
        corrupted[len - 1] ^= 0x55;
        let mut result = Ok(None);
        for &b in &corrupted[..len] {
            result = parser.push(b);
        }
        assert_eq!(result, Err(FrameError::BadChecksum));

        let mut frame = None;
        for &b in &buf[..len] {
            frame = parser.push(b).unwrap();
        }
        assert_eq!(frame.unwrap().kind, 0x01);
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        assert_eq!(
            decode_all(&[LINK_SYNC, (MAX_PAYLOAD_SIZE + 1) as u8]),
            Err(FrameError::Malformed)
        );
    }

    #[test]
    fn test_encode_into_short_buffer() {
        let frame = Frame::new(0x03, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 6];
        assert_eq!(frame.encode(&mut buf), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_payload_too_large() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x20, &payload), Err(FrameError::PayloadTooLarge));
    }
}
