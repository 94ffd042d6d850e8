#![allow(dead_code)]

use std::{
    str::FromStr,
    sync::Once,
};

use tracing_subscriber::{
    fmt::format::FmtSpan,
    EnvFilter,
};

use sensornet::{
    io::{
        self,
        DecodeOptions,
    },
    Family,
    Packet,
};

static TRACE_INIT: Once = Once::new();

pub fn trace_init() {
    TRACE_INIT.call_once(|| {
        let level_filter = EnvFilter::from_str("debug").unwrap();

        tracing_subscriber::fmt()
            .with_test_writer()
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(level_filter)
            .init();
    });
}

pub fn opts(family: Family) -> DecodeOptions {
    DecodeOptions {
        family,
        cobs: false,
        keep_going: false,
    }
}

/// Decode `input` completely, returning every packet seen before the stream ended or failed.
pub async fn decode_all(input: &[u8], opts: DecodeOptions) -> (Vec<Packet>, eyre::Result<usize>) {
    let mut out = vec![];

    let result = io::decode_packets(input, opts, |p| {
        out.push(p);
        Ok(())
    })
    .await;

    (out, result)
}
