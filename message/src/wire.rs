use packed_struct::{
    prelude::*,
    PackedStructInfo,
};

use crate::{
    DecodeError,
    EncodeError,
};

/// A value with a known on-air encoding.
///
/// Fixed-layout messages always occupy the same number of bytes. Families of messages that share
/// a discriminator namespace (see [`NetworkMsg`](crate::NetworkMsg)) know their length once the
/// leading byte is available.
pub trait Wire: Sized {
    /// Number of bytes this value occupies when encoded.
    fn wire_len(&self) -> usize;

    /// Number of bytes the value at the head of `src` occupies, or `None` if more input is needed
    /// to tell.
    fn frame_len(src: &[u8]) -> Result<Option<usize>, DecodeError>;

    /// Encode into the front of `dst`, returning the number of bytes written.
    fn encode_to_slice(&self, dst: &mut [u8]) -> Result<usize, EncodeError>;

    /// Decode the value at the head of `src`. Bytes past the end of the value are ignored.
    fn decode(src: &[u8]) -> Result<Self, DecodeError>;

    fn encode_to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = vec![0; self.wire_len()];
        self.encode_to_slice(&mut out)?;

        Ok(out)
    }
}

#[inline]
pub(crate) fn packed_size<T: PackedStructInfo>() -> usize {
    let bits = T::packed_bits();
    debug_assert_eq!(bits % 8, 0);

    bits / 8
}

pub(crate) fn pack_fixed<T>(val: &T, dst: &mut [u8]) -> Result<usize, EncodeError>
where
    T: PackedStruct + PackedStructInfo,
{
    let size = packed_size::<T>();
    let dst = dst.get_mut(..size).ok_or(PackingError::BufferTooSmall)?;

    val.pack_to_slice(dst)?;

    Ok(size)
}

pub(crate) fn unpack_fixed<T>(src: &[u8]) -> Result<T, DecodeError>
where
    T: PackedStruct + PackedStructInfo,
{
    let size = packed_size::<T>();
    let frame = src.get(..size).ok_or(DecodeError::TooShort {
        expected: size,
        actual:   src.len(),
    })?;

    // the leading type byte is the only field in any layout that can be rejected
    T::unpack_from_slice(frame).map_err(|e| {
        let tag = frame.first().copied().unwrap_or_default();

        tracing::trace!(
            ty = std::any::type_name::<T>(),
            tag = %format_args!("{tag:#04x}"),
            error = %e,
            "rejected message type"
        );

        DecodeError::UnknownType(tag)
    })
}

/// Implement [`Wire`] and a fixed-size `encode` for a `PackedStruct` whose size is known
/// statically.
macro_rules! impl_fixed_wire {
    ($($ty:ty => $size:literal),+ $(,)?) => {
        $(
            impl $ty {
                pub const SIZE: usize = $size;

                #[inline]
                pub fn encode(&self) -> Result<[u8; $size], $crate::EncodeError> {
                    Ok(::packed_struct::PackedStruct::pack(self)?)
                }

                #[inline]
                pub fn decode(src: &[u8]) -> Result<Self, $crate::DecodeError> {
                    $crate::wire::unpack_fixed(src)
                }
            }

            impl $crate::Wire for $ty {
                #[inline]
                fn wire_len(&self) -> usize {
                    Self::SIZE
                }

                #[inline]
                fn frame_len(_src: &[u8]) -> Result<Option<usize>, $crate::DecodeError> {
                    Ok(Some(Self::SIZE))
                }

                #[inline]
                fn encode_to_slice(&self, dst: &mut [u8]) -> Result<usize, $crate::EncodeError> {
                    $crate::wire::pack_fixed(self, dst)
                }

                #[inline]
                fn decode(src: &[u8]) -> Result<Self, $crate::DecodeError> {
                    $crate::wire::unpack_fixed(src)
                }
            }
        )+
    };
}

pub(crate) use impl_fixed_wire;
