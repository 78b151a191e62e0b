use serde::Deserialize;

/// Acknowledgement sent back by the system under test. The payload is a
/// JSON datagram; only `count` is required and unknown fields are ignored,
/// so the sender is free to extend its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Acknowledgement {
    /// Sequence number of the frame being acknowledged.
    pub count: u32,
}

impl Acknowledgement {
    pub fn decode(data: &[u8]) -> Result<Self, AckError> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AckError {
    #[error("malformed acknowledgement: {0}")]
    Malformed(#[from] serde_json::Error),
}
