//! Report, beacon and target messages. All three share one discriminator namespace carried in
//! their first byte, so a receiver can tell them apart from content alone.

use std::fmt::{
    Display,
    Formatter,
};

use packed_struct::prelude::*;

use crate::{
    consts::{
        REP,
        TMSG,
    },
    wire::impl_fixed_wire,
    DecodeError,
    EncodeError,
    MagicValue,
    Wire,
};

pub type ReportTag = MagicValue<{ REP }>;
pub type TargetTag = MagicValue<{ TMSG }>;

/// Every discriminator in the report/beacon/target namespace.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum MsgType {
    Report    = 0xAA,
    Broadcast = 0xBB,
    Request   = 0xCC,
    Target    = 0xDD,
}

impl MsgType {
    /// Encoded size of the message this discriminator introduces.
    #[inline]
    pub const fn wire_len(self) -> usize {
        match self {
            MsgType::Report => ReportMsg::SIZE,
            MsgType::Broadcast | MsgType::Request => BeaconMsg::SIZE,
            MsgType::Target => TargetMsg::SIZE,
        }
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum BeaconKind {
    /// Presence announcement.
    Broadcast = 0xBB,
    /// Asks every node in the subnet to answer with a [`ReportMsg`].
    Request   = 0xCC,
}

/// A node's identity sent back in answer to a [`BeaconKind::Request`].
///
/// The 16-bit id carries the subnet in its high byte and the node in its low byte.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PackedStruct, serde::Serialize, serde::Deserialize,
)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "3", endian = "msb")]
pub struct ReportMsg {
    #[packed_field(size_bytes = "1")]
    pub msgtype: ReportTag,
    nodeid:      u16,
}

impl ReportMsg {
    #[inline]
    pub const fn new(subnet_id: u8, node_id: u8) -> Self {
        Self::from_raw(((subnet_id as u16) << 8) | node_id as u16)
    }

    #[inline]
    pub const fn from_raw(nodeid: u16) -> Self {
        Self {
            msgtype: ReportTag::INSTANCE,
            nodeid,
        }
    }

    #[inline]
    pub const fn raw_id(&self) -> u16 {
        self.nodeid
    }

    #[inline]
    pub const fn subnet_id(&self) -> u8 {
        (self.nodeid >> 8) as u8
    }

    #[inline]
    pub const fn node_id(&self) -> u8 {
        (self.nodeid & 0xff) as u8
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PackedStruct, serde::Serialize, serde::Deserialize,
)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "2")]
pub struct BeaconMsg {
    #[packed_field(size_bytes = "1", ty = "enum")]
    pub msgtype:  BeaconKind,
    pub subnetid: u8,
}

impl BeaconMsg {
    #[inline]
    pub const fn broadcast(subnetid: u8) -> Self {
        Self {
            msgtype: BeaconKind::Broadcast,
            subnetid,
        }
    }

    #[inline]
    pub const fn request(subnetid: u8) -> Self {
        Self {
            msgtype: BeaconKind::Request,
            subnetid,
        }
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PackedStruct,
    serde::Serialize,
    serde::Deserialize,
)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "1")]
pub struct TargetMsg {
    #[packed_field(size_bytes = "1")]
    pub msgtype: TargetTag,
}

impl TargetMsg {
    pub const INSTANCE: Self = Self {
        msgtype: TargetTag::INSTANCE,
    };
}

impl_fixed_wire! {
    ReportMsg => 3,
    BeaconMsg => 2,
    TargetMsg => 1,
}

/// Any message from the report/beacon/target namespace, told apart by its first byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NetworkMsg {
    Report(ReportMsg),
    Beacon(BeaconMsg),
    Target(TargetMsg),
}

impl NetworkMsg {
    #[inline]
    pub fn msg_type(&self) -> MsgType {
        match self {
            NetworkMsg::Report(_) => MsgType::Report,
            NetworkMsg::Beacon(BeaconMsg {
                msgtype: BeaconKind::Broadcast,
                ..
            }) => MsgType::Broadcast,
            NetworkMsg::Beacon(BeaconMsg {
                msgtype: BeaconKind::Request,
                ..
            }) => MsgType::Request,
            NetworkMsg::Target(_) => MsgType::Target,
        }
    }

    fn tag(src: &[u8]) -> Result<Option<MsgType>, DecodeError> {
        let Some(&tag) = src.first() else {
            return Ok(None);
        };

        match MsgType::from_primitive(tag) {
            Some(ty) => Ok(Some(ty)),
            None => {
                tracing::trace!(tag = %format_args!("{tag:#04x}"), "unknown network message type");
                Err(DecodeError::UnknownType(tag))
            },
        }
    }
}

impl Wire for NetworkMsg {
    #[inline]
    fn wire_len(&self) -> usize {
        self.msg_type().wire_len()
    }

    #[inline]
    fn frame_len(src: &[u8]) -> Result<Option<usize>, DecodeError> {
        Ok(Self::tag(src)?.map(MsgType::wire_len))
    }

    fn encode_to_slice(&self, dst: &mut [u8]) -> Result<usize, EncodeError> {
        match self {
            NetworkMsg::Report(m) => m.encode_to_slice(dst),
            NetworkMsg::Beacon(m) => m.encode_to_slice(dst),
            NetworkMsg::Target(m) => m.encode_to_slice(dst),
        }
    }

    fn decode(src: &[u8]) -> Result<Self, DecodeError> {
        let ty = Self::tag(src)?.ok_or(DecodeError::TooShort {
            expected: 1,
            actual:   0,
        })?;

        match ty {
            MsgType::Report => ReportMsg::decode(src).map(NetworkMsg::Report),
            MsgType::Broadcast | MsgType::Request => BeaconMsg::decode(src).map(NetworkMsg::Beacon),
            MsgType::Target => TargetMsg::decode(src).map(NetworkMsg::Target),
        }
    }
}

impl From<ReportMsg> for NetworkMsg {
    fn from(m: ReportMsg) -> Self {
        NetworkMsg::Report(m)
    }
}

impl From<BeaconMsg> for NetworkMsg {
    fn from(m: BeaconMsg) -> Self {
        NetworkMsg::Beacon(m)
    }
}

impl From<TargetMsg> for NetworkMsg {
    fn from(m: TargetMsg) -> Self {
        NetworkMsg::Target(m)
    }
}

impl Display for NetworkMsg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // the packed structs carry packed_struct's own field-table Display
        match self {
            NetworkMsg::Report(m) => {
                write!(f, "REPORT subnet {} node {}", m.subnet_id(), m.node_id())
            },
            NetworkMsg::Beacon(BeaconMsg {
                msgtype: BeaconKind::Broadcast,
                subnetid,
            }) => write!(f, "BEACON subnet {subnetid}"),
            NetworkMsg::Beacon(BeaconMsg {
                msgtype: BeaconKind::Request,
                subnetid,
            }) => write!(f, "REQUEST subnet {subnetid}"),
            NetworkMsg::Target(_) => write!(f, "TARGET"),
        }
    }
}
