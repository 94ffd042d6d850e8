//! Numeric identifiers shared with the deployed node firmware. These values are part of the
//! wire contract and must not change.

/// [`ReportMsg`](crate::ReportMsg) discriminator.
pub const REP: u8 = 0xAA;

/// [`BeaconMsg`](crate::BeaconMsg) discriminator: plain beacon.
pub const BCAST: u8 = 0xBB;

/// [`BeaconMsg`](crate::BeaconMsg) discriminator: request-for-report beacon.
pub const REQ: u8 = 0xCC;

/// [`TargetMsg`](crate::TargetMsg) discriminator.
pub const TMSG: u8 = 0xDD;

/// Interval between [`TargetMsg`](crate::TargetMsg) transmissions, in timer ticks.
pub const TARGETPERIOD: u32 = 512;

/// Interval between [`BeaconMsg`](crate::BeaconMsg) transmissions, in timer ticks.
pub const BEACONPERIOD: u32 = 1024;

/// Active-message type under which [`RadioPacketMsg`](crate::RadioPacketMsg) is sent.
pub const AM_RADIO_PACKET_MSG: u8 = 41;

// radio packet namespace, unrelated to the discriminators above
pub const MASTER_POWER_REQUEST: u8 = 0;
pub const SLAVE_POWER_RESPONSE: u8 = 1;
pub const NEAR_ID: u8 = 2;
