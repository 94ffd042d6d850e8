use message::RadioMsgType;
use sensornet::{
    io::InputFormat,
    Family,
};

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
#[structopt(about = "encode and decode sensor network packets")]
pub struct Options {
    #[structopt(long, global = true, help = "multi-line log output")]
    pub pretty: bool,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
pub enum Command {
    /// Decode packets from stdin (default raw binary format), one per output line.
    Decode {
        #[structopt(long, default_value = "network", possible_values = &Family::VARIANTS)]
        family: Family,

        #[structopt(flatten)]
        input: Input,

        #[structopt(long, help = "input is a sequence of COBS frames, one packet per frame")]
        cobs: bool,

        #[structopt(long, help = "print packets as JSON")]
        json: bool,

        #[structopt(long, help = "log undecodable input and continue")]
        keep_going: bool,
    },

    /// Print the hex encoding of a single packet.
    Encode {
        #[structopt(long, help = "wrap the packet in a COBS frame")]
        cobs: bool,

        #[structopt(subcommand)]
        packet: PacketArgs,
    },

    /// Print the hex encoding of reference packets and the transmission periods.
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
pub struct Input {
    #[structopt(
        long,
        conflicts_with = "base64",
        help = "interpret stdin as hex (can be whitespace separated, does not strip 0x)"
    )]
    hex: bool,

    #[structopt(long, help = "interpret stdin as base64")]
    base64: bool,
}

impl Input {
    pub fn format(&self) -> InputFormat {
        match self {
            Input {
                hex: true,
                ..
            } => InputFormat::Hex,
            Input {
                base64: true,
                ..
            } => InputFormat::Base64,
            _ => InputFormat::Raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
pub enum PacketArgs {
    /// Report carrying a node's subnet and node id.
    Report { subnet: u8, node: u8 },

    /// Presence beacon.
    Beacon { subnet: u8 },

    /// Request-for-report beacon.
    Request { subnet: u8 },

    /// Target detection.
    Target,

    /// Power negotiation packet.
    Radio {
        #[structopt(help = "MASTER_POWER_REQUEST, SLAVE_POWER_RESPONSE, NEAR_ID or 0-2")]
        msg_type: RadioMsgType,

        node: u8,

        #[structopt(allow_hyphen_values = true)]
        data: i16,
    },

    /// Bare subnet/node pair.
    Message { subnet: u8, node: u8 },
}
