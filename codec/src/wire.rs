use std::marker::PhantomData;

use bytes::{
    Buf,
    BytesMut,
};
use message::Wire;
use tokio_util::codec::{
    Decoder,
    Encoder,
};

use crate::Error;

/// Frames [`Wire`] values directly on a byte stream. There is no delimiter or length prefix: the
/// frame length comes from the value's layout (and, for message families, its leading type
/// byte).
///
/// A rejected type byte is dropped from the buffer before the error is returned, so a caller
/// driving the decoder by hand can resynchronise on the next byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WireCodec<T>(PhantomData<T>);

impl<T> WireCodec<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for WireCodec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Encoder<T> for WireCodec<T>
where
    T: Wire,
{
    type Error = Error;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();
        dst.resize(start + item.wire_len(), 0);

        item.encode_to_slice(&mut dst[start..])?;

        Ok(())
    }
}

impl<T> Decoder for WireCodec<T>
where
    T: Wire,
{
    type Error = Error;
    type Item = T;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let len = match T::frame_len(src.as_ref()) {
            Ok(Some(len)) => len,
            Ok(None) => return Ok(None),
            Err(e) => {
                src.advance(1);
                return Err(e.into());
            },
        };

        if src.len() < len {
            src.reserve(len - src.len());
            return Ok(None);
        }

        match T::decode(&src[..len]) {
            Ok(item) => {
                src.advance(len);
                Ok(Some(item))
            },
            Err(e) => {
                tracing::debug!(frame = %hex::encode(&src[..len]), error = %e, "dropping bad type byte");
                src.advance(1);
                Err(e.into())
            },
        }
    }
}

#[cfg(test)]
mod test {
    use message::{
        BeaconMsg,
        DecodeError,
        NetworkMsg,
        RadioMsgType,
        RadioPacketMsg,
        ReportMsg,
        TargetMsg,
    };

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn waits_for_full_frame() -> eyre::Result<()> {
        let mut codec = WireCodec::<RadioPacketMsg>::new();
        let mut buf = BytesMut::new();

        assert_eq!(codec.decode(&mut buf)?, None);

        buf.extend_from_slice(&[0x02, 0x07, 0xff]);
        assert_eq!(codec.decode(&mut buf)?, None);
        assert_eq!(buf.len(), 3);

        buf.extend_from_slice(&[0xfd, 0x00]);
        assert_eq!(
            codec.decode(&mut buf)?,
            Some(RadioPacketMsg::new(RadioMsgType::NearId, 7, -3))
        );
        assert_eq!(buf.as_ref(), &[0x00]);

        Ok(())
    }

    #[test]
    fn mixed_network_stream() -> eyre::Result<()> {
        let msgs: Vec<NetworkMsg> = vec![
            BeaconMsg::request(3).into(),
            ReportMsg::new(3, 17).into(),
            TargetMsg::INSTANCE.into(),
            BeaconMsg::broadcast(1).into(),
        ];

        let mut codec = WireCodec::<NetworkMsg>::new();
        let mut buf = BytesMut::new();

        for msg in &msgs {
            codec.encode(*msg, &mut buf)?;
        }

        assert_eq!(buf.as_ref(), &[0xCC, 3, 0xAA, 3, 17, 0xDD, 0xBB, 1]);

        let mut out = vec![];
        while let Some(msg) = codec.decode(&mut buf)? {
            out.push(msg);
        }

        assert_eq!(out, msgs);
        assert!(buf.is_empty());

        Ok(())
    }

    #[test]
    fn resync_after_unknown_type() -> eyre::Result<()> {
        let mut codec = WireCodec::<NetworkMsg>::new();
        let mut buf = BytesMut::from(&[0x42, 0xBB, 0x05][..]);

        match codec.decode(&mut buf) {
            Err(Error::Decode(DecodeError::UnknownType(0x42))) => {},
            other => panic!("unexpected decode result: {other:?}"),
        }

        assert_eq!(codec.decode(&mut buf)?, Some(BeaconMsg::broadcast(5).into()));

        Ok(())
    }

    #[test]
    fn fixed_layout_bad_type() -> eyre::Result<()> {
        let mut codec = WireCodec::<RadioPacketMsg>::new();
        let mut buf = BytesMut::from(&[0xAA, 0x00, 0x01, 0x00, 0x05, 0x00][..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(Error::Decode(DecodeError::UnknownType(0xAA)))
        ));

        assert_eq!(
            codec.decode(&mut buf)?,
            Some(RadioPacketMsg::new(RadioMsgType::MasterPowerRequest, 1, 5))
        );

        Ok(())
    }

    proptest! {
        #[test]
        fn chunking_is_transparent(
            msgs in prop::collection::vec(network_strategy(), 0..16),
            chunk in 1usize..8,
        ) {
            let mut codec = WireCodec::<NetworkMsg>::new();

            let mut encoded = BytesMut::new();
            for msg in &msgs {
                codec.encode(*msg, &mut encoded).unwrap();
            }

            let mut buf = BytesMut::new();
            let mut out = vec![];

            for piece in encoded.chunks(chunk) {
                buf.extend_from_slice(piece);

                while let Some(msg) = codec.decode(&mut buf).unwrap() {
                    out.push(msg);
                }
            }

            prop_assert_eq!(out, msgs);
            prop_assert!(buf.is_empty());
        }
    }

    fn network_strategy() -> impl Strategy<Value = NetworkMsg> {
        prop_oneof![
            any::<u16>().prop_map(|id| ReportMsg::from_raw(id).into()),
            any::<u8>().prop_map(|s| BeaconMsg::broadcast(s).into()),
            any::<u8>().prop_map(|s| BeaconMsg::request(s).into()),
            Just(TargetMsg::INSTANCE.into()),
        ]
    }
}
