//! Wire formats for the sensor network.
//!
//! Every message is a fixed, padding-free byte layout with multi-byte fields in network byte
//! order. Two independent discriminator namespaces exist: [`NetworkMsg`] (report, beacon and
//! target messages) and [`RadioPacketMsg`] (power negotiation). [`Message`] has no
//! discriminator at all.

pub mod consts;
mod error;
mod magic_value;
pub mod network;
mod node;
pub mod period;
pub mod radio;
mod wire;

pub use error::{
    DecodeError,
    EncodeError,
};
pub use magic_value::MagicValue;
pub use network::{
    BeaconKind,
    BeaconMsg,
    MsgType,
    NetworkMsg,
    ReportMsg,
    TargetMsg,
};
pub use node::Message;
pub use period::Ticks;
pub use radio::{
    ParseRadioMsgTypeError,
    RadioMsgType,
    RadioPacketMsg,
};
pub use wire::Wire;
