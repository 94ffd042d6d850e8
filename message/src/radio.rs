//! Power negotiation packets sent under [`AM_RADIO_PACKET_MSG`]. Their type byte belongs to a
//! namespace of its own and is never interpreted as a [`MsgType`](crate::MsgType).

use std::{
    fmt::{
        Display,
        Formatter,
    },
    str::FromStr,
};

use packed_struct::prelude::*;

use crate::{
    consts::AM_RADIO_PACKET_MSG,
    wire::impl_fixed_wire,
};

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum RadioMsgType {
    MasterPowerRequest = 0,
    SlavePowerResponse = 1,
    NearId             = 2,
}

impl RadioMsgType {
    pub const fn name(self) -> &'static str {
        match self {
            RadioMsgType::MasterPowerRequest => "MASTER_POWER_REQUEST",
            RadioMsgType::SlavePowerResponse => "SLAVE_POWER_RESPONSE",
            RadioMsgType::NearId => "NEAR_ID",
        }
    }
}

impl Display for RadioMsgType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized radio message type: {0}")]
pub struct ParseRadioMsgTypeError(String);

/// Accepts the constant name in any case (`-` and `_` interchangeable) or its numeric value.
impl FromStr for RadioMsgType {
    type Err = ParseRadioMsgTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");

        let by_name = [
            RadioMsgType::MasterPowerRequest,
            RadioMsgType::SlavePowerResponse,
            RadioMsgType::NearId,
        ]
        .into_iter()
        .find(|ty| ty.name() == normalized);

        by_name
            .or_else(|| normalized.parse::<u8>().ok().and_then(RadioMsgType::from_primitive))
            .ok_or_else(|| ParseRadioMsgTypeError(s.to_owned()))
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PackedStruct, serde::Serialize, serde::Deserialize,
)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "4", endian = "msb")]
pub struct RadioPacketMsg {
    #[packed_field(size_bytes = "1", ty = "enum")]
    pub msg_type: RadioMsgType,
    pub node_id:  u8,
    pub data:     i16,
}

impl RadioPacketMsg {
    pub const AM_TYPE: u8 = AM_RADIO_PACKET_MSG;

    #[inline]
    pub const fn new(msg_type: RadioMsgType, node_id: u8, data: i16) -> Self {
        Self {
            msg_type,
            node_id,
            data,
        }
    }
}

impl_fixed_wire! {
    RadioPacketMsg => 4,
}
