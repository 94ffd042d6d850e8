#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] message::DecodeError),

    #[error(transparent)]
    Encode(#[from] message::EncodeError),

    #[error("malformed cobs frame")]
    Cobs,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
