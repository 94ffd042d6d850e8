use bytes::{
    Buf,
    BufMut,
    BytesMut,
};
use tokio_util::codec::{
    Decoder,
    Encoder,
};

use crate::Error;

pub const SENTINEL: u8 = 0;

/// Zero-delimited COBS framing, used when packets travel over a serial line to a base station.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub struct CobsCodec;

impl<T> Encoder<T> for CobsCodec
where
    T: AsRef<[u8]>,
{
    type Error = Error;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let item = item.as_ref();

        let old_len = dst.len();
        dst.resize(old_len + cobs::max_encoding_length(item.len()), 0);

        let count = cobs::encode(item, &mut dst[old_len..]);
        dst.truncate(old_len + count);
        dst.put_u8(SENTINEL);

        Ok(())
    }
}

impl Decoder for CobsCodec {
    type Error = Error;
    type Item = BytesMut;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(end) = src.iter().position(|&b| b == SENTINEL) else {
            return Ok(None);
        };

        // bare sentinel: line flush or resync, not a malformed frame
        if end == 0 {
            src.advance(1);
            return Ok(Some(BytesMut::new()));
        }

        let frame = src.split_to(end + 1);
        let decoded = cobs::decode_vec(&frame[..end]).map_err(|_| {
            tracing::warn!(frame = %hex::encode(&frame), "malformed cobs frame");
            Error::Cobs
        })?;

        Ok(Some(BytesMut::from(&decoded[..])))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_frames() -> eyre::Result<()> {
        let mut codec = CobsCodec;
        let mut buf = BytesMut::new();

        codec.encode([0xAAu8, 0x00, 0x01], &mut buf)?;
        codec.encode([0xDDu8], &mut buf)?;

        assert_eq!(buf.as_ref(), &[0x02, 0xAA, 0x02, 0x01, 0x00, 0x02, 0xDD, 0x00]);

        assert_eq!(codec.decode(&mut buf)?.as_deref(), Some(&[0xAA, 0x00, 0x01][..]));
        assert_eq!(codec.decode(&mut buf)?.as_deref(), Some(&[0xDD][..]));
        assert_eq!(codec.decode(&mut buf)?, None);

        Ok(())
    }

    #[test]
    fn partial_frame() -> eyre::Result<()> {
        let mut codec = CobsCodec;
        let mut buf = BytesMut::from(&[0x03, 0xBB, 0x05][..]);

        assert_eq!(codec.decode(&mut buf)?, None);
        assert_eq!(buf.len(), 3);

        buf.put_u8(SENTINEL);
        assert_eq!(codec.decode(&mut buf)?.as_deref(), Some(&[0xBB, 0x05][..]));

        Ok(())
    }

    #[test]
    fn bare_sentinels_are_empty_frames() -> eyre::Result<()> {
        let mut codec = CobsCodec;
        let mut buf = BytesMut::from(&[0x00, 0x00, 0x03, 0xBB, 0x05, 0x00][..]);

        assert_eq!(codec.decode(&mut buf)?.as_deref(), Some(&[][..]));
        assert_eq!(codec.decode(&mut buf)?.as_deref(), Some(&[][..]));
        assert_eq!(codec.decode(&mut buf)?.as_deref(), Some(&[0xBB, 0x05][..]));
        assert!(buf.is_empty());

        Ok(())
    }

    #[test]
    fn malformed_frame() {
        let mut codec = CobsCodec;

        // code byte claims more data than the frame holds
        let mut buf = BytesMut::from(&[0x05, 0x01, 0x00][..]);

        assert!(matches!(codec.decode(&mut buf), Err(Error::Cobs)));
        assert!(buf.is_empty());
    }
}
