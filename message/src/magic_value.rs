use std::{
    cmp::Ordering,
    fmt::{
        Display,
        Formatter,
    },
    hash::Hasher,
};

use packed_struct::{
    prelude::*,
    PackedStructInfo,
    PackingResult,
};
use serde::{
    de::Error,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

/// A single byte fixed at `C`. Unpacking any other value fails with
/// [`PackingError::InvalidValue`].
#[derive(Copy, Clone, Debug, Eq, Ord, Default)]
pub struct MagicValue<const C: u8>;

impl<const C: u8> MagicValue<C> {
    pub const INSTANCE: Self = Self;
    pub const VALUE: u8 = C;
}

impl<const C: u8> PackedStruct for MagicValue<C> {
    type ByteArray = [u8; 1];

    #[inline]
    fn pack(&self) -> PackingResult<Self::ByteArray> {
        Ok([C])
    }

    #[inline]
    fn unpack(src: &Self::ByteArray) -> PackingResult<Self> {
        if src[0] == C {
            Ok(Self)
        } else {
            tracing::trace!(expected = C, got = src[0], "magic byte mismatch");
            Err(PackingError::InvalidValue)
        }
    }
}

impl<const C: u8> PackedStructInfo for MagicValue<C> {
    #[inline]
    fn packed_bits() -> usize {
        std::mem::size_of::<u8>() * 8
    }
}

impl<const C: u8, const D: u8> PartialEq<MagicValue<D>> for MagicValue<C> {
    #[inline]
    fn eq(&self, _other: &MagicValue<D>) -> bool {
        C == D
    }
}

impl<const C: u8, const D: u8> PartialOrd<MagicValue<D>> for MagicValue<C> {
    fn partial_cmp(&self, _other: &MagicValue<D>) -> Option<Ordering> {
        C.partial_cmp(&D)
    }
}

impl<const C: u8> std::hash::Hash for MagicValue<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        C.hash(state)
    }
}

impl<const C: u8> Display for MagicValue<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{C:#04x}")
    }
}

impl<const C: u8> Serialize for MagicValue<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(C)
    }
}

impl<'de, const C: u8> Deserialize<'de> for MagicValue<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let val = u8::deserialize(deserializer)?;

        if val != C {
            return Err(Error::custom(format!(
                "magic value mismatch (expected: {C:#04x}, got: {val:#04x})"
            )));
        }

        Ok(MagicValue)
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::consts::{
        REP,
        TMSG,
    };

    fn only_valid<const C: u8>(x: u8) {
        let packed = MagicValue::<C>::INSTANCE.pack().unwrap();
        assert_eq!(packed, [C]);

        let unpack_result = MagicValue::<C>::unpack(&[x]);

        match x {
            x if x == C => assert_eq!(unpack_result, Ok(MagicValue)),
            _otherwise => assert_eq!(unpack_result, Err(PackingError::InvalidValue)),
        }
    }

    proptest! {
        #[test]
        fn only_valid_rep(x in any::<u8>()) {
            only_valid::<{ REP }>(x)
        }

        #[test]
        fn only_valid_tmsg(x in any::<u8>()) {
            only_valid::<{ TMSG }>(x)
        }

        #[test]
        fn only_valid_0(x in any::<u8>()) {
            only_valid::<0>(x)
        }
    }

    #[test]
    fn test_serde() {
        let result = serde_json::to_string(&MagicValue::<{ REP }>::INSTANCE).unwrap();
        assert_eq!("170", result);

        let back: MagicValue<{ REP }> = serde_json::from_str(&result).unwrap();
        assert_eq!(back, MagicValue::<{ REP }>::INSTANCE);

        assert!(serde_json::from_str::<MagicValue<{ REP }>>("171").is_err());
    }
}
