pub use codec;
pub use message;
pub use util;

pub mod io;
pub mod packet;
pub mod trace;

pub use packet::{
    Family,
    Packet,
    ParseFamilyError,
};
