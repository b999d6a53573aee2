//! Host-side collaborators for running the bridge outside real hardware:
//! a channel-backed line link and a report sink that logs USB traffic.

use std::sync::mpsc;

use tracing::{info, trace};

use crate::bridge::LineLink;
use crate::bridge::report::{KeyboardReport, ReportSink};

/// Command/data bytes toward the keyboard travel over a plain channel; the
/// receiving end belongs to whatever emulates (or drives) the device.
pub struct ChannelLink {
    tx: mpsc::Sender<u8>,
}

impl ChannelLink {
    pub fn pair() -> (ChannelLink, mpsc::Receiver<u8>) {
        let (tx, rx) = mpsc::channel();
        (ChannelLink { tx }, rx)
    }
}

impl LineLink for ChannelLink {
    fn send(&mut self, byte: u8) {
        trace!("line > {byte:02X}");
        _ = self.tx.send(byte);
    }
}

/// Report sink that prints every report instead of handing it to a USB
/// stack. Always ready, never suspended.
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn ready(&self) -> bool {
        true
    }

    fn send_keyboard(&mut self, report_id: u8, modifiers: u8, keys: [u8; 6]) -> bool {
        let report = KeyboardReport {
            modifiers,
            reserved: 0,
            keys,
        };
        info!("usb > [{report_id}] {:02X?}", bytemuck::bytes_of(&report));
        true
    }

    fn send_usage8(&mut self, report_id: u8, value: u8) -> bool {
        info!("usb > [{report_id}] system {value:02X}");
        true
    }

    fn send_usage16(&mut self, report_id: u8, usage: u16) -> bool {
        info!("usb > [{report_id}] consumer {usage:04X}");
        true
    }
}
