use std::time::Duration;

use crate::consts::{
    BEACONPERIOD,
    TARGETPERIOD,
};

/// Rate of the node timer: binary milliseconds.
pub const TICKS_PER_SECOND: u32 = 1024;

pub const TARGET_PERIOD: Ticks = Ticks::new(TARGETPERIOD);
pub const BEACON_PERIOD: Ticks = Ticks::new(BEACONPERIOD);

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::From,
    derive_more::Into,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[display(fmt = "{} ticks", _0)]
pub struct Ticks(u32);

impl Ticks {
    #[inline]
    pub const fn new(val: u32) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_micros(self.0 as u64 * 1_000_000 / TICKS_PER_SECOND as u64)
    }
}

impl From<Ticks> for Duration {
    #[inline]
    fn from(t: Ticks) -> Self {
        t.as_duration()
    }
}
