use packed_struct::PackingError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DecodeError {
    #[error("buffer too short: need {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("unknown message type 0x{0:02x}")]
    UnknownType(u8),
}

#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[error(transparent)]
pub struct EncodeError(#[from] pub PackingError);
