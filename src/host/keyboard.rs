//! Emulated legacy keyboard for loopback demos and end-to-end tests.
//!
//! Speaks the device side of the line protocol: answers the liveness probe,
//! runs the set-indicators ack/data/ack exchange, and turns scripted key
//! taps into make/break scan-code sequences. Scan codes go straight into
//! the bridge's queue handle, the same way a real line driver's receive
//! callback would.

use std::sync::mpsc;

use tracing::{debug, trace, warn};

use crate::bridge::codes::{cmd, ind};
use crate::bridge::led::DeviceLeds;
use crate::bridge::queue::ScanQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmdState {
    Ready,
    /// Set-indicators was acked; the next command byte is the LED data.
    AwaitLedByte,
}

pub struct EmuKeyboard {
    commands: mpsc::Receiver<u8>,
    out: ScanQueue,
    state: CmdState,
    leds: DeviceLeds,
}

impl EmuKeyboard {
    pub fn new(commands: mpsc::Receiver<u8>, out: ScanQueue) -> Self {
        Self {
            commands,
            out,
            state: CmdState::Ready,
            leds: DeviceLeds::default(),
        }
    }

    /// Announce a completed power-on self test.
    pub fn power_on(&self) {
        self.put(ind::SELF_TEST_PASSED);
    }

    /// Current lamp state, as last written by the host.
    pub fn leds(&self) -> DeviceLeds {
        self.leds
    }

    /// Drain and answer pending commands from the bridge.
    pub fn tick(&mut self) {
        while let Ok(byte) = self.commands.try_recv() {
            match self.state {
                CmdState::AwaitLedByte => {
                    self.leds = DeviceLeds::from_wire(byte);
                    debug!("emu keyboard lamps {:?}", self.leds);
                    self.put(ind::ACK);
                    self.state = CmdState::Ready;
                }
                CmdState::Ready => match byte {
                    cmd::SET_INDICATORS => {
                        self.put(ind::ACK);
                        self.state = CmdState::AwaitLedByte;
                    }
                    cmd::ECHO => self.put(ind::ECHO),
                    _ => {
                        warn!("emu keyboard: unsupported command {byte:02X}");
                        self.put(ind::RESEND);
                    }
                },
            }
        }
    }

    pub fn press(&self, scan: u8) {
        self.put(scan);
    }

    pub fn release(&self, scan: u8) {
        self.put(ind::BREAK);
        self.put(scan);
    }

    pub fn press_extended(&self, scan: u8) {
        self.put(ind::EXT0);
        self.put(scan);
    }

    pub fn release_extended(&self, scan: u8) {
        self.put(ind::EXT0);
        self.put(ind::BREAK);
        self.put(scan);
    }

    /// Type one character as a make/break pair. Returns false for
    /// characters outside the supported demo set.
    pub fn tap_char(&self, c: char) -> bool {
        let Some(scan) = scan_code(c) else {
            warn!("emu keyboard: no scan code for {c:?}");
            return false;
        };
        self.press(scan);
        self.release(scan);
        true
    }

    fn put(&self, byte: u8) {
        trace!("emu keyboard > {byte:02X}");
        if !self.out.put(byte) {
            warn!("emu keyboard: bridge queue full, byte lost");
        }
    }
}

/// Base-set scan codes for the demo character set.
fn scan_code(c: char) -> Option<u8> {
    Some(match c {
        'a' => 0x1C,
        'b' => 0x32,
        'c' => 0x21,
        'd' => 0x23,
        'e' => 0x24,
        'f' => 0x2B,
        'g' => 0x34,
        'h' => 0x33,
        'i' => 0x43,
        'j' => 0x3B,
        'k' => 0x42,
        'l' => 0x4B,
        'm' => 0x3A,
        'n' => 0x31,
        'o' => 0x44,
        'p' => 0x4D,
        'q' => 0x15,
        'r' => 0x2D,
        's' => 0x1B,
        't' => 0x2C,
        'u' => 0x3C,
        'v' => 0x2A,
        'w' => 0x1D,
        'x' => 0x22,
        'y' => 0x35,
        'z' => 0x1A,
        '1' => 0x16,
        '2' => 0x1E,
        '3' => 0x26,
        '4' => 0x25,
        '5' => 0x2E,
        '6' => 0x36,
        '7' => 0x3D,
        '8' => 0x3E,
        '9' => 0x46,
        '0' => 0x45,
        ' ' => 0x29,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::bridge::report::testing::{RecordingSink, Sent};
    use crate::bridge::report::{REPORT_ID_KEYBOARD, ReportType};
    use crate::bridge::{Bridge, BridgeConfig, LineLink, usage};

    struct ChannelLine(mpsc::Sender<u8>);

    impl LineLink for ChannelLine {
        fn send(&mut self, byte: u8) {
            _ = self.0.send(byte);
        }
    }

    fn setup() -> (Bridge<ChannelLine, RecordingSink>, EmuKeyboard) {
        let (tx, rx) = mpsc::channel();
        let bridge = Bridge::new(
            ChannelLine(tx),
            RecordingSink::default(),
            BridgeConfig {
                probe_interval: None,
            },
        );
        let keyboard = EmuKeyboard::new(rx, bridge.queue());
        (bridge, keyboard)
    }

    fn run(bridge: &mut Bridge<ChannelLine, RecordingSink>, keyboard: &mut EmuKeyboard) {
        let now = Instant::now();
        for _ in 0..32 {
            keyboard.tick();
            bridge.poll(now);
        }
    }

    #[test]
    fn typed_character_reaches_the_sink() {
        let (mut bridge, mut keyboard) = setup();
        keyboard.tap_char('a');
        run(&mut bridge, &mut keyboard);
        assert_eq!(
            bridge.sink().sent,
            vec![
                Sent::Keyboard(0, [usage::KEY_A, 0, 0, 0, 0, 0]),
                Sent::Keyboard(0, [0; 6]),
            ]
        );
    }

    #[test]
    fn host_led_update_reaches_the_lamps() {
        let (mut bridge, mut keyboard) = setup();
        keyboard.power_on();
        // Num lock + caps lock from the host side.
        bridge.host_report(REPORT_ID_KEYBOARD, ReportType::Output, &[0x03]);
        run(&mut bridge, &mut keyboard);
        assert!(keyboard.leds().is_num());
        assert!(keyboard.leds().is_caps());
        assert!(!keyboard.leds().is_scroll());
    }

    #[test]
    fn unsupported_character_is_refused() {
        let (_bridge, keyboard) = setup();
        assert!(!keyboard.tap_char('€'));
    }
}
