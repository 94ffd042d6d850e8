use std::{
    fmt::{
        Display,
        Formatter,
    },
    str::FromStr,
};

use message::{
    EncodeError,
    Message,
    NetworkMsg,
    RadioPacketMsg,
    Wire,
};

/// Which discriminator namespace (or bare layout) a byte stream is read as. Nothing on the wire
/// identifies the family, so it has to come from the channel the bytes arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Network,
    Radio,
    Message,
}

impl Family {
    pub const VARIANTS: [&'static str; 3] = ["network", "radio", "message"];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message family: {0}")]
pub struct ParseFamilyError(String);

impl FromStr for Family {
    type Err = ParseFamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "network" => Ok(Family::Network),
            "radio" => Ok(Family::Radio),
            "message" => Ok(Family::Message),
            _ => Err(ParseFamilyError(s.to_owned())),
        }
    }
}

/// A decoded packet from any family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Packet {
    Network(NetworkMsg),
    Radio(RadioPacketMsg),
    Message(Message),
}

impl Packet {
    pub fn family(&self) -> Family {
        match self {
            Packet::Network(_) => Family::Network,
            Packet::Radio(_) => Family::Radio,
            Packet::Message(_) => Family::Message,
        }
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Packet::Network(m) => m.encode_to_vec(),
            Packet::Radio(m) => m.encode_to_vec(),
            Packet::Message(m) => m.encode_to_vec(),
        }
    }
}

impl From<NetworkMsg> for Packet {
    fn from(m: NetworkMsg) -> Self {
        Packet::Network(m)
    }
}

impl From<RadioPacketMsg> for Packet {
    fn from(m: RadioPacketMsg) -> Self {
        Packet::Radio(m)
    }
}

impl From<Message> for Packet {
    fn from(m: Message) -> Self {
        Packet::Message(m)
    }
}

impl Display for Packet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Packet::Network(m) => Display::fmt(m, f),
            Packet::Radio(RadioPacketMsg {
                msg_type,
                node_id,
                data,
            }) => write!(f, "{msg_type} node {node_id} data {data}"),
            Packet::Message(Message {
                subnetid,
                nodeid,
            }) => write!(f, "MESSAGE subnet {subnetid} node {nodeid}"),
        }
    }
}

#[cfg(test)]
mod test {
    use message::{
        BeaconMsg,
        RadioMsgType,
    };

    use super::*;

    #[test]
    fn display() {
        let radio = Packet::from(RadioPacketMsg::new(RadioMsgType::NearId, 7, -3));
        assert_eq!(radio.to_string(), "NEAR_ID node 7 data -3");

        let message = Packet::from(Message::new(1, 2));
        assert_eq!(message.to_string(), "MESSAGE subnet 1 node 2");

        let beacon = Packet::from(NetworkMsg::from(BeaconMsg::request(4)));
        assert_eq!(beacon.to_string(), "REQUEST subnet 4");
    }

    #[test]
    fn parse_family() {
        assert_eq!("Radio".parse::<Family>(), Ok(Family::Radio));
        assert_eq!("network".parse::<Family>(), Ok(Family::Network));

        for name in Family::VARIANTS {
            assert!(name.parse::<Family>().is_ok());
        }

        assert_eq!("serial".parse::<Family>(), Err(ParseFamilyError("serial".to_owned())));
    }
}
