//! HID report assembly and delivery.
//!
//! The assembler owns the modifier bitmask and the six-slot rollover array,
//! and pushes boundary reports through a [`ReportSink`] with a bounded
//! retry. Reports are only sent when the state actually changed, so a
//! repeated make from the keyboard's typematic repeat produces no traffic.

use std::fmt;
use std::thread;
use std::time::Duration;

use bytemuck::{Pod, Zeroable};
use tracing::{trace, warn};

use crate::bridge::usage;

pub const REPORT_ID_KEYBOARD: u8 = 1;
pub const REPORT_ID_SYSTEM: u8 = 2;
pub const REPORT_ID_CONSUMER: u8 = 3;

const SEND_RETRY_COUNT: usize = 3;
/// Upper bound on the per-attempt readiness wait, in 1 ms polls.
const READY_WAIT_POLLS: u32 = 8;

/// Direction/type of a HID report delivered by the device-class layer.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Input,
    Output,
    Feature,
}

/// Output-report collaborator: the USB device-class layer.
///
/// `send_*` return false when the endpoint could not accept the report;
/// the assembler retries a bounded number of times and then drops it.
pub trait ReportSink {
    fn ready(&self) -> bool;
    fn send_keyboard(&mut self, report_id: u8, modifiers: u8, keys: [u8; 6]) -> bool;
    fn send_usage8(&mut self, report_id: u8, value: u8) -> bool;
    fn send_usage16(&mut self, report_id: u8, usage: u16) -> bool;

    /// Whether the host has suspended the link.
    fn suspended(&self) -> bool {
        false
    }

    /// Ask the host to resume the link (remote wakeup).
    fn request_wake(&mut self) {}
}

/// Boot-protocol keyboard report layout.
#[derive(Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct KeyboardReport {
    pub modifiers: u8,
    pub reserved: u8,
    pub keys: [u8; 6],
}

/// Modifier bitmask, one bit per modifier usage in first-to-last order
/// left-ctrl, left-shift, left-alt, left-gui, right-ctrl, right-shift,
/// right-alt, right-gui.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers(u8);

impl Modifiers {
    /// Bitmask for a modifier usage, or 0 for ordinary keys.
    pub fn mask_for(code: u8) -> u8 {
        if !(usage::CONTROL_LEFT..=usage::GUI_RIGHT).contains(&code) {
            return 0;
        }
        1 << (code - usage::CONTROL_LEFT)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn shift_held(self) -> bool {
        self.0 & (Self::mask_for(usage::SHIFT_LEFT) | Self::mask_for(usage::SHIFT_RIGHT)) != 0
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modifiers({:02X}=", self.0)?;
        let mut first = true;
        for (name, usage) in [
            ("LCtrl", usage::CONTROL_LEFT),
            ("LShift", usage::SHIFT_LEFT),
            ("LAlt", usage::ALT_LEFT),
            ("LGui", usage::GUI_LEFT),
            ("RCtrl", usage::CONTROL_RIGHT),
            ("RShift", usage::SHIFT_RIGHT),
            ("RAlt", usage::ALT_RIGHT),
            ("RGui", usage::GUI_RIGHT),
        ] {
            if self.0 & Self::mask_for(usage) != 0 {
                if first {
                    first = false;
                } else {
                    write!(f, "+")?;
                }
                write!(f, "{name}")?;
            }
        }
        write!(f, ")")
    }
}

/// Rollover state plus report delivery.
pub struct Assembler<S> {
    sink: S,
    modifiers: Modifiers,
    keys: [u8; 6],
}

impl<S: ReportSink> Assembler<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            modifiers: Modifiers::default(),
            keys: [0; 6],
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.shift_held()
    }

    /// Insert or remove a usage in the rollover slots. Returns true when
    /// the slots changed. A seventh simultaneous key is silently ignored
    /// per rollover convention; removal compacts the remaining slots
    /// leftward so the filled prefix stays contiguous.
    fn update_keys(&mut self, code: u8, make: bool) -> bool {
        if make {
            for slot in self.keys.iter_mut() {
                if *slot == code {
                    return false;
                }
                if *slot == 0 {
                    *slot = code;
                    return true;
                }
            }
            false
        } else {
            let Some(at) = self.keys.iter().position(|&slot| slot == code) else {
                return false;
            };
            self.keys.copy_within(at + 1.., at);
            self.keys[5] = 0;
            true
        }
    }

    /// Set or clear modifier bits. Returns true when the mask changed.
    fn update_modifiers(&mut self, mask: u8, make: bool) -> bool {
        let prev = self.modifiers.0;
        if make {
            self.modifiers.0 |= mask;
        } else {
            self.modifiers.0 &= !mask;
        }
        self.modifiers.0 != prev
    }

    /// Report a key event, routing modifiers to the bitmask and ordinary
    /// keys to the rollover slots. Sends a report only on change.
    pub fn send_key(&mut self, code: u8, make: bool) {
        let mask = Modifiers::mask_for(code);
        let changed = if mask != 0 {
            self.update_modifiers(mask, make)
        } else {
            self.update_keys(code, make)
        };
        if changed {
            trace!(
                "key {code:02X} {} {:?} {:02X?}",
                if make { "make" } else { "break" },
                self.modifiers,
                self.keys
            );
            self.send_keyboard_report();
        }
    }

    /// Report a key event together with a synthesized modifier, as one
    /// combined report.
    pub fn send_key_with_mod(&mut self, code: u8, mod_code: u8, make: bool) {
        let key_changed = self.update_keys(code, make);
        let mod_changed = self.update_modifiers(Modifiers::mask_for(mod_code), make);
        if key_changed || mod_changed {
            self.send_keyboard_report();
        }
    }

    /// Send a consumer-style usage, then the neutral usage once the sink
    /// is ready again. Models a momentary button press.
    pub fn pulse_usage16(&mut self, report_id: u8, value: u16) {
        self.send_usage16(report_id, value);
        self.wait_ready();
        self.send_usage16(report_id, usage::consumer::NONE);
    }

    pub fn send_usage16(&mut self, report_id: u8, value: u16) {
        for _ in 0..SEND_RETRY_COUNT {
            if self.sink.send_usage16(report_id, value) {
                return;
            }
            self.wait_ready();
        }
        warn!("usage report {report_id}/{value:04X} dropped after {SEND_RETRY_COUNT} attempts");
    }

    pub fn send_usage8(&mut self, report_id: u8, value: u8) {
        for _ in 0..SEND_RETRY_COUNT {
            if self.sink.send_usage8(report_id, value) {
                return;
            }
            self.wait_ready();
        }
        warn!("usage report {report_id}/{value:02X} dropped after {SEND_RETRY_COUNT} attempts");
    }

    fn send_keyboard_report(&mut self) {
        for _ in 0..SEND_RETRY_COUNT {
            if self
                .sink
                .send_keyboard(REPORT_ID_KEYBOARD, self.modifiers.bits(), self.keys)
            {
                return;
            }
            self.wait_ready();
        }
        warn!("keyboard report dropped after {SEND_RETRY_COUNT} attempts");
    }

    fn wait_ready(&self) {
        for _ in 0..READY_WAIT_POLLS {
            if self.sink.ready() {
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Everything a sink was asked to send, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Sent {
        Keyboard(u8, [u8; 6]),
        Usage8(u8, u8),
        Usage16(u8, u16),
    }

    #[derive(Default)]
    pub struct RecordingSink {
        pub sent: Vec<Sent>,
        /// Number of leading send attempts to refuse.
        pub refuse: usize,
        pub suspended: bool,
        pub wake_requests: usize,
    }

    impl ReportSink for RecordingSink {
        fn ready(&self) -> bool {
            true
        }

        fn suspended(&self) -> bool {
            self.suspended
        }

        fn request_wake(&mut self) {
            self.wake_requests += 1;
        }

        fn send_keyboard(&mut self, _report_id: u8, modifiers: u8, keys: [u8; 6]) -> bool {
            if self.refuse > 0 {
                self.refuse -= 1;
                return false;
            }
            self.sent.push(Sent::Keyboard(modifiers, keys));
            true
        }

        fn send_usage8(&mut self, report_id: u8, value: u8) -> bool {
            if self.refuse > 0 {
                self.refuse -= 1;
                return false;
            }
            self.sent.push(Sent::Usage8(report_id, value));
            true
        }

        fn send_usage16(&mut self, report_id: u8, usage: u16) -> bool {
            if self.refuse > 0 {
                self.refuse -= 1;
                return false;
            }
            self.sent.push(Sent::Usage16(report_id, usage));
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordingSink, Sent};
    use super::*;

    fn assembler() -> Assembler<RecordingSink> {
        Assembler::new(RecordingSink::default())
    }

    #[test]
    fn slots_keep_first_press_order() {
        let mut asm = assembler();
        asm.send_key(usage::KEY_A, true);
        asm.send_key(usage::KEY_B, true);
        asm.send_key(usage::KEY_C, true);
        assert_eq!(
            asm.sink().sent.last(),
            Some(&Sent::Keyboard(0, [usage::KEY_A, usage::KEY_B, usage::KEY_C, 0, 0, 0]))
        );
    }

    #[test]
    fn repeated_make_is_silent() {
        let mut asm = assembler();
        asm.send_key(usage::KEY_A, true);
        asm.send_key(usage::KEY_A, true);
        assert_eq!(asm.sink().sent.len(), 1);
    }

    #[test]
    fn removal_compacts_without_gaps() {
        let mut asm = assembler();
        for code in [usage::KEY_A, usage::KEY_B, usage::KEY_C] {
            asm.send_key(code, true);
        }
        asm.send_key(usage::KEY_B, false);
        assert_eq!(
            asm.sink().sent.last(),
            Some(&Sent::Keyboard(0, [usage::KEY_A, usage::KEY_C, 0, 0, 0, 0]))
        );
    }

    #[test]
    fn removal_of_last_slot() {
        let mut asm = assembler();
        asm.send_key(usage::KEY_A, true);
        asm.send_key(usage::KEY_A, false);
        assert_eq!(asm.sink().sent.last(), Some(&Sent::Keyboard(0, [0; 6])));
    }

    #[test]
    fn seventh_key_is_dropped() {
        let mut asm = assembler();
        for code in [0x04, 0x05, 0x06, 0x07, 0x08, 0x09] {
            asm.send_key(code, true);
        }
        asm.send_key(0x0A, true);
        assert_eq!(asm.sink().sent.len(), 6);
        asm.send_key(0x0A, false);
        // Releasing the dropped key is also silent.
        assert_eq!(asm.sink().sent.len(), 6);
    }

    #[test]
    fn modifier_bits() {
        let mut asm = assembler();
        asm.send_key(usage::SHIFT_LEFT, true);
        assert!(asm.shift_held());
        assert_eq!(asm.sink().sent.last(), Some(&Sent::Keyboard(0x02, [0; 6])));
        asm.send_key(usage::SHIFT_LEFT, false);
        assert!(!asm.shift_held());
    }

    #[test]
    fn synthesized_modifier_travels_with_key() {
        let mut asm = assembler();
        asm.send_key_with_mod(usage::PRINT_SCREEN, usage::ALT_LEFT, true);
        assert_eq!(
            asm.sink().sent.last(),
            Some(&Sent::Keyboard(0x04, [usage::PRINT_SCREEN, 0, 0, 0, 0, 0]))
        );
        asm.send_key_with_mod(usage::PRINT_SCREEN, usage::ALT_LEFT, false);
        assert_eq!(asm.sink().sent.last(), Some(&Sent::Keyboard(0, [0; 6])));
    }

    #[test]
    fn pulse_sends_value_then_neutral() {
        let mut asm = assembler();
        asm.pulse_usage16(REPORT_ID_CONSUMER, usage::consumer::MUTE);
        assert_eq!(
            asm.sink().sent,
            vec![
                Sent::Usage16(REPORT_ID_CONSUMER, usage::consumer::MUTE),
                Sent::Usage16(REPORT_ID_CONSUMER, usage::consumer::NONE),
            ]
        );
    }

    #[test]
    fn busy_sink_is_retried() {
        let mut asm = assembler();
        asm.sink_mut().refuse = 2;
        asm.send_key(usage::KEY_A, true);
        assert_eq!(asm.sink().sent.len(), 1);
    }

    #[test]
    fn exhausted_retries_drop_the_report() {
        let mut asm = assembler();
        asm.sink_mut().refuse = 3;
        asm.send_key(usage::KEY_A, true);
        assert!(asm.sink().sent.is_empty());
        // The slot state still advanced; the next change resends it.
        asm.send_key(usage::KEY_B, true);
        assert_eq!(
            asm.sink().sent.last(),
            Some(&Sent::Keyboard(0, [usage::KEY_A, usage::KEY_B, 0, 0, 0, 0]))
        );
    }

    #[test]
    fn keyboard_report_is_a_plain_byte_view() {
        let report = KeyboardReport {
            modifiers: 0x02,
            reserved: 0,
            keys: [usage::KEY_A, 0, 0, 0, 0, 0],
        };
        assert_eq!(bytemuck::bytes_of(&report), &[0x02, 0, 0x04, 0, 0, 0, 0, 0]);
    }
}
