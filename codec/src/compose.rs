use std::marker::PhantomData;

use bytes::BytesMut;
use tokio_util::codec::{
    Decoder,
    Encoder,
};

/// Runs `Inner` over each frame produced by `Outer`.
///
/// Each outer frame must hold exactly one inner item; bytes left in a frame after the item are
/// discarded and empty frames are skipped.
pub struct ComposeCodecs<Inner, Outer, E> {
    inner:    Inner,
    outer:    Outer,
    _phantom: PhantomData<E>,
}

impl<Inner, Outer, E> ComposeCodecs<Inner, Outer, E> {
    pub fn new(inner: Inner, outer: Outer) -> Self {
        Self {
            inner,
            outer,
            _phantom: PhantomData,
        }
    }
}

impl<Inner, Outer, Item, E> Encoder<Item> for ComposeCodecs<Inner, Outer, E>
where
    Inner: Encoder<Item>,
    Outer: Encoder<BytesMut>,
    E: From<Inner::Error> + From<Outer::Error> + From<std::io::Error>,
{
    type Error = E;

    fn encode(&mut self, item: Item, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let mut b = BytesMut::new();

        self.inner.encode(item, &mut b)?;
        self.outer.encode(b, dst)?;

        Ok(())
    }
}

impl<Inner, Outer, E> Decoder for ComposeCodecs<Inner, Outer, E>
where
    Inner: Decoder,
    Outer: Decoder,
    Outer::Item: Into<BytesMut>,
    E: From<Inner::Error> + From<Outer::Error> + From<std::io::Error>,
{
    type Error = E;
    type Item = Inner::Item;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(frame) = self.outer.decode(src)? {
            let mut frame: BytesMut = frame.into();
            if frame.is_empty() {
                continue;
            }

            if let Some(item) = self.inner.decode_eof(&mut frame)? {
                if !frame.is_empty() {
                    tracing::debug!(trailing = frame.len(), "discarding trailing frame bytes");
                }

                return Ok(Some(item));
            }
        }

        Ok(None)
    }
}
