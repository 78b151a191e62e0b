pub const FRAME_SIGNATURE: u32 = 0x7FF01CAF;
pub const FRAME_SIZE: usize = 20;
pub const MAX_ACK_SIZE: usize = 1024;
pub const DEFAULT_ACK_PORT: u16 = 9000;
pub const DEFAULT_SEND_INTERVAL_MS: u64 = 80;

/// One emulated sensor sample. The wire form is 20 bytes, every field
/// big-endian: `[signature:u32][sequence:u32][x:f32][y:f32][z:f32]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame {
    pub sequence: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SensorFrame {
    /// Derives the sample body from the sequence number so emitted output
    /// is reproducible run to run.
    pub fn synthesize(sequence: u32) -> Self {
        let c = sequence as f32;
        Self {
            sequence,
            x: 0.1 * c,
            y: 0.02 * c,
            z: 0.01 * c,
        }
    }

    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        let mut buf = [0u8; FRAME_SIZE];
        buf[0..4].copy_from_slice(&FRAME_SIGNATURE.to_be_bytes());
        buf[4..8].copy_from_slice(&self.sequence.to_be_bytes());
        buf[8..12].copy_from_slice(&self.x.to_be_bytes());
        buf[12..16].copy_from_slice(&self.y.to_be_bytes());
        buf[16..20].copy_from_slice(&self.z.to_be_bytes());
        buf
    }

    pub fn decode(data: &[u8]) -> Result<Self, FrameError> {
        if data.len() != FRAME_SIZE {
            return Err(FrameError::Length(data.len()));
        }

        let signature = be_u32(&data[0..4]);
        if signature != FRAME_SIGNATURE {
            return Err(FrameError::Signature(signature));
        }

        Ok(Self {
            sequence: be_u32(&data[4..8]),
            x: be_f32(&data[8..12]),
            y: be_f32(&data[12..16]),
            z: be_f32(&data[16..20]),
        })
    }
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn be_f32(bytes: &[u8]) -> f32 {
    f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame is {0} bytes, expected {FRAME_SIZE}")]
    Length(usize),
    #[error("unknown frame signature {0:#010x}")]
    Signature(u32),
}
