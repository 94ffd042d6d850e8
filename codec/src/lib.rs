pub use ::tokio_util::codec as tokio_codec;

mod cobs;
mod compose;
mod error;
mod wire;

pub use self::{
    cobs::*,
    compose::ComposeCodecs,
    error::Error,
    wire::WireCodec,
};

/// Wire values carried one per COBS frame.
pub type FramedWireCodec<T> = ComposeCodecs<WireCodec<T>, CobsCodec, Error>;

impl<T> FramedWireCodec<T> {
    pub fn framed() -> Self {
        Self::new(WireCodec::new(), CobsCodec)
    }
}
