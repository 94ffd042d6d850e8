use std::io::Write;

use eyre::Result;
use structopt::StructOpt as _;
use tap::Pipe;
use tokio::io::AsyncReadExt;

use message::{
    period::{
        BEACON_PERIOD,
        TARGET_PERIOD,
    },
    BeaconMsg,
    Message,
    NetworkMsg,
    RadioMsgType,
    RadioPacketMsg,
    ReportMsg,
    TargetMsg,
};
use sensornet::{
    io::{
        self,
        DecodeOptions,
        InputFormat,
    },
    trace,
    Packet,
};
use util::build;

use crate::options::{
    Command,
    Options,
    PacketArgs,
};

mod options;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let options = Options::from_args();

    trace::init(options.pretty);

    tracing::debug!(
        application = build::PACKAGE,
        version = build::VERSION,
        build_commit = build::COMMIT_HASH,
        profile = build::PROFILE,
        "tracing subsystem initialized"
    );

    match options.command {
        Command::Decode {
            family,
            input,
            cobs,
            json,
            keep_going,
        } => {
            let opts = DecodeOptions {
                family,
                cobs,
                keep_going,
            };

            decode(input.format(), opts, json).await
        },

        Command::Encode {
            cobs,
            packet,
        } => {
            let bytes = io::encode_packet(&packet_from_args(packet), cobs)?;
            println!("{}", hex::encode(bytes));

            Ok(())
        },

        Command::Table => table(),
    }
}

async fn decode(format: InputFormat, opts: DecodeOptions, json: bool) -> Result<()> {
    let stdout = std::io::stdout();

    let emit = |packet: Packet| -> Result<()> {
        let mut out = stdout.lock();

        if json {
            serde_json::to_writer(&mut out, &packet)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{packet}")?;
        }

        Ok(())
    };

    let count = match format {
        InputFormat::Raw => io::decode_packets(tokio::io::stdin(), opts, emit).await?,
        format => {
            let mut s = String::new();
            tokio::io::stdin().read_to_string(&mut s).await?;

            let reader = io::parse_text(format, &s)?.pipe(std::io::Cursor::new);
            io::decode_packets(reader, opts, emit).await?
        },
    };

    tracing::info!(count, family = ?opts.family, "decoded packets");

    Ok(())
}

fn packet_from_args(args: PacketArgs) -> Packet {
    match args {
        PacketArgs::Report {
            subnet,
            node,
        } => NetworkMsg::from(ReportMsg::new(subnet, node)).into(),
        PacketArgs::Beacon {
            subnet,
        } => NetworkMsg::from(BeaconMsg::broadcast(subnet)).into(),
        PacketArgs::Request {
            subnet,
        } => NetworkMsg::from(BeaconMsg::request(subnet)).into(),
        PacketArgs::Target => NetworkMsg::from(TargetMsg::INSTANCE).into(),
        PacketArgs::Radio {
            msg_type,
            node,
            data,
        } => RadioPacketMsg::new(msg_type, node, data).into(),
        PacketArgs::Message {
            subnet,
            node,
        } => Message::new(subnet, node).into(),
    }
}

fn table() -> Result<()> {
    eprintln!("hex encoding of reference packets");
    eprintln!();

    let packets: Vec<(&str, Packet)> = vec![
        ("beacon, subnet 1", NetworkMsg::from(BeaconMsg::broadcast(1)).into()),
        ("request for report, subnet 1", NetworkMsg::from(BeaconMsg::request(1)).into()),
        ("report, subnet 1 node 2", NetworkMsg::from(ReportMsg::new(1, 2)).into()),
        ("target detected", NetworkMsg::from(TargetMsg::INSTANCE).into()),
        (
            "master power request, node 1",
            RadioPacketMsg::new(RadioMsgType::MasterPowerRequest, 1, 0).into(),
        ),
        (
            "slave power response, node 2, data 100",
            RadioPacketMsg::new(RadioMsgType::SlavePowerResponse, 2, 100).into(),
        ),
        ("near id, node 7, data -3", RadioPacketMsg::new(RadioMsgType::NearId, 7, -3).into()),
        ("subnet 1 node 2 (no type byte)", Message::new(1, 2).into()),
    ];

    packets.into_iter().try_for_each(|(desc, packet)| -> Result<()> {
        eprintln!("{desc}");
        println!("{}", hex::encode(packet.encode_to_vec()?));
        eprintln!();

        Ok(())
    })?;

    eprintln!("target period: {TARGET_PERIOD} ({:?})", TARGET_PERIOD.as_duration());
    eprintln!("beacon period: {BEACON_PERIOD} ({:?})", BEACON_PERIOD.as_duration());
    eprintln!("radio packet AM type: {}", RadioPacketMsg::AM_TYPE);

    Ok(())
}
