use std::error::Error as StdError;

use base64::Engine;
use bytes::BytesMut;
use futures::StreamExt;
use message::{
    Message,
    NetworkMsg,
    RadioPacketMsg,
    Wire,
};
use tokio::io::AsyncRead;
use tokio_util::codec::{
    Decoder,
    Encoder,
    FramedRead,
};

use codec::{
    CobsCodec,
    FramedWireCodec,
    WireCodec,
};

use crate::packet::{
    Family,
    Packet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    #[default]
    Raw,
    Hex,
    Base64,
}

/// Turn textual input into bytes. Hex may be split by any whitespace and must not carry a `0x`
/// prefix.
pub fn parse_text(format: InputFormat, s: &str) -> eyre::Result<Vec<u8>> {
    let result = match format {
        InputFormat::Raw => s.as_bytes().to_vec(),
        InputFormat::Hex => {
            let stripped = s.split_whitespace().collect::<String>();
            hex::decode(stripped)?
        },
        InputFormat::Base64 => base64::engine::general_purpose::STANDARD.decode(s.trim())?,
    };

    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
    pub family:     Family,
    /// One packet per COBS frame instead of back-to-back packets.
    pub cobs:       bool,
    /// Log undecodable input and carry on with the next byte or frame.
    pub keep_going: bool,
}

/// Decode every packet from `reader`, handing each to `emit`. Returns the number of packets
/// decoded.
#[tracing::instrument(skip(reader, emit), err(Display))]
pub async fn decode_packets<R>(
    reader: R,
    opts: DecodeOptions,
    emit: impl FnMut(Packet) -> eyre::Result<()>,
) -> eyre::Result<usize>
where
    R: AsyncRead + Unpin,
{
    match opts.family {
        Family::Network => decode_as::<NetworkMsg, _>(reader, opts, emit).await,
        Family::Radio => decode_as::<RadioPacketMsg, _>(reader, opts, emit).await,
        Family::Message => decode_as::<Message, _>(reader, opts, emit).await,
    }
}

async fn decode_as<T, R>(
    reader: R,
    opts: DecodeOptions,
    mut emit: impl FnMut(Packet) -> eyre::Result<()>,
) -> eyre::Result<usize>
where
    T: Wire + Into<Packet> + Unpin,
    R: AsyncRead + Unpin,
{
    let emit = move |t: T| emit(t.into());

    match (opts.cobs, opts.keep_going) {
        (false, false) => drain(reader, WireCodec::<T>::new(), emit).await,
        (false, true) => drain(reader, SkipErrors(WireCodec::<T>::new()), emit).await,
        (true, false) => drain(reader, FramedWireCodec::<T>::framed(), emit).await,
        (true, true) => drain(reader, SkipErrors(FramedWireCodec::<T>::framed()), emit).await,
    }
}

async fn drain<R, D>(
    reader: R,
    decoder: D,
    mut emit: impl FnMut(D::Item) -> eyre::Result<()>,
) -> eyre::Result<usize>
where
    R: AsyncRead + Unpin,
    D: Decoder + Unpin,
    D::Error: StdError + Send + Sync + 'static,
{
    let mut frames = FramedRead::new(reader, decoder);
    let mut count = 0;

    while let Some(item) = frames.next().await {
        emit(item?)?;
        count += 1;
    }

    tracing::debug!(count, "input exhausted");

    Ok(count)
}

/// Wraps a decoder so that decode errors are logged and skipped, as long as the inner decoder
/// consumed input while failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SkipErrors<D>(pub D);

impl<D> Decoder for SkipErrors<D>
where
    D: Decoder,
    D::Error: std::fmt::Display,
{
    type Error = D::Error;
    type Item = D::Item;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let before = src.len();

            if let Some(item) = util::trace_catch!(self.0.decode(src), "skipping undecodable input")
            {
                return Ok(item);
            }

            if src.len() == before {
                return Ok(None);
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(item) = self.decode(src)? {
            return Ok(Some(item));
        }

        if src.is_empty() {
            return Ok(None);
        }

        let tail =
            util::trace_catch!(self.0.decode_eof(src), "skipping undecodable input at end of stream");

        if let Some(Some(item)) = tail {
            return Ok(Some(item));
        }

        src.clear();
        Ok(None)
    }
}

/// Encode a packet, optionally as a COBS frame.
pub fn encode_packet(packet: &Packet, cobs: bool) -> eyre::Result<Vec<u8>> {
    let raw = packet.encode_to_vec()?;

    if !cobs {
        return Ok(raw);
    }

    let mut dst = BytesMut::new();
    CobsCodec.encode(raw, &mut dst)?;

    Ok(dst.to_vec())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_hex() -> eyre::Result<()> {
        let bytes = parse_text(InputFormat::Hex, "bb 05\ncc\t07\r\n")?;
        assert_eq!(bytes, vec![0xbb, 0x05, 0xcc, 0x07]);

        assert!(parse_text(InputFormat::Hex, "0xbb").is_err());
        assert!(parse_text(InputFormat::Hex, "bb0").is_err());

        Ok(())
    }

    #[test]
    fn parse_base64() -> eyre::Result<()> {
        let bytes = parse_text(InputFormat::Base64, "AgD//Q==\n")?;
        assert_eq!(bytes, vec![0x02, 0x00, 0xff, 0xfd]);

        Ok(())
    }

    #[test]
    fn skip_errors_resyncs() -> eyre::Result<()> {
        let mut codec = SkipErrors(WireCodec::<NetworkMsg>::new());
        let mut buf = BytesMut::from(&[0x01, 0x02, 0xDD, 0xAA][..]);

        assert_eq!(codec.decode(&mut buf)?, Some(message::TargetMsg::INSTANCE.into()));
        assert_eq!(codec.decode(&mut buf)?, None);
        assert_eq!(buf.as_ref(), &[0xAA]);

        Ok(())
    }

    #[test]
    fn skip_errors_drops_truncated_tail() -> eyre::Result<()> {
        let mut codec = SkipErrors(WireCodec::<NetworkMsg>::new());
        let mut buf = BytesMut::from(&[0xDD, 0xAA, 0x01][..]);

        assert_eq!(codec.decode_eof(&mut buf)?, Some(message::TargetMsg::INSTANCE.into()));
        assert_eq!(codec.decode_eof(&mut buf)?, None);
        assert!(buf.is_empty());

        Ok(())
    }

    #[test]
    fn encode_cobs() -> eyre::Result<()> {
        let packet = Packet::from(NetworkMsg::from(message::BeaconMsg::broadcast(5)));

        assert_eq!(encode_packet(&packet, false)?, vec![0xBB, 0x05]);
        assert_eq!(encode_packet(&packet, true)?, vec![0x03, 0xBB, 0x05, 0x00]);

        Ok(())
    }
}
