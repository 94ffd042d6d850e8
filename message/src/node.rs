use packed_struct::prelude::*;

use crate::wire::impl_fixed_wire;

/// Bare subnet/node address pair.
///
/// Carries no type byte: which channel it arrived on is the only thing that identifies it.
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
#[packed_struct(bit_numbering = "msb0", size_bytes = "2")]
pub struct Message {
    pub subnetid: u8,
    pub nodeid:   u8,
}

impl Message {
    #[inline]
    pub const fn new(subnetid: u8, nodeid: u8) -> Self {
        Self {
            subnetid,
            nodeid,
        }
    }
}

impl_fixed_wire! {
    Message => 2,
}
