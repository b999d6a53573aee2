//! Function-layer overlay: two designated physical keys reroute subsequent
//! key events to media and system control actions.
//!
//! Caps Lock is the primary trigger (unless a shift modifier is held, in
//! which case it passes through as a literal Caps Lock tap), Right Ctrl is
//! the secondary. Both are level-triggered: the layer is active exactly
//! while a trigger is held. The dispatch rules are shaped by one hard
//! requirement: no interleaving of trigger and key presses may leave a key
//! latched in the output report.

use tracing::trace;

use crate::bridge::report::{Assembler, REPORT_ID_CONSUMER, REPORT_ID_SYSTEM, ReportSink};
use crate::bridge::usage::{self, consumer, system};

#[derive(Default)]
pub struct Overlay {
    left_active: bool,
    right_active: bool,
    /// A repeating consumer control (volume) is currently held, so further
    /// make events must not re-issue it.
    consumer_held: bool,
}

impl Overlay {
    pub fn active(&self) -> bool {
        self.left_active || self.right_active
    }

    /// Route a key event through the overlay. Returns true when the event
    /// was consumed and must not be reported as a literal key.
    ///
    /// Break events deliberately fall through in two cases:
    /// - overlay active: the overlay action is released, and the literal
    ///   break is also propagated in case the key was made before the
    ///   trigger ("press key, press trigger, release key" must not leave
    ///   the key held);
    /// - overlay inactive: a volume control latched while the overlay was
    ///   still active must be released even though the trigger is already
    ///   up ("press trigger, press volume, release trigger, release
    ///   volume").
    pub fn dispatch<S: ReportSink>(
        &mut self,
        code: u8,
        make: bool,
        out: &mut Assembler<S>,
    ) -> bool {
        if code == usage::CAPS_LOCK {
            if make {
                if out.shift_held() {
                    out.send_key(usage::CAPS_LOCK, true);
                    out.send_key(usage::CAPS_LOCK, false);
                } else {
                    self.left_active = true;
                }
            } else {
                self.left_active = false;
            }
            trace!(
                "overlay left {}",
                if self.left_active { "on" } else { "off" }
            );
            return true;
        }
        if code == usage::CONTROL_RIGHT {
            self.right_active = make;
            trace!(
                "overlay right {}",
                if self.right_active { "on" } else { "off" }
            );
            return true;
        }
        if self.active() {
            self.control_action(code, make, out);
            return make;
        }
        if !make {
            self.control_action(code, false, out);
        }
        false
    }

    fn control_action<S: ReportSink>(&mut self, code: u8, make: bool, out: &mut Assembler<S>) {
        if make {
            match code {
                usage::PAUSE => out.send_usage8(REPORT_ID_SYSTEM, system::STANDBY),
                usage::INTL6 => out.send_usage8(REPORT_ID_SYSTEM, system::POWER_OFF),
                usage::KEYPAD_0 => out.pulse_usage16(REPORT_ID_CONSUMER, consumer::MUTE),
                usage::ARROW_DOWN | usage::KEYPAD_2 => {
                    if !self.consumer_held {
                        out.send_usage16(REPORT_ID_CONSUMER, consumer::VOLUME_DECREMENT);
                        self.consumer_held = true;
                    }
                }
                usage::ARROW_UP | usage::KEYPAD_8 => {
                    if !self.consumer_held {
                        out.send_usage16(REPORT_ID_CONSUMER, consumer::VOLUME_INCREMENT);
                        self.consumer_held = true;
                    }
                }
                usage::ARROW_LEFT | usage::KEYPAD_4 | usage::PAGE_UP => {
                    out.pulse_usage16(REPORT_ID_CONSUMER, consumer::SCAN_PREVIOUS_TRACK)
                }
                usage::ARROW_RIGHT | usage::KEYPAD_6 | usage::PAGE_DOWN => {
                    out.pulse_usage16(REPORT_ID_CONSUMER, consumer::SCAN_NEXT_TRACK)
                }
                usage::SPACE | usage::KEYPAD_5 => {
                    out.pulse_usage16(REPORT_ID_CONSUMER, consumer::PLAY_PAUSE)
                }
                usage::HOME | usage::KEYPAD_7 => {
                    out.pulse_usage16(REPORT_ID_CONSUMER, consumer::PLAY)
                }
                usage::END | usage::KEYPAD_1 => {
                    out.pulse_usage16(REPORT_ID_CONSUMER, consumer::PAUSE)
                }
                _ => {}
            }
        } else {
            match code {
                usage::ARROW_DOWN
                | usage::KEYPAD_2
                | usage::ARROW_UP
                | usage::KEYPAD_8 => {
                    if self.consumer_held {
                        out.send_usage16(REPORT_ID_CONSUMER, consumer::NONE);
                        self.consumer_held = false;
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::report::testing::{RecordingSink, Sent};

    fn setup() -> (Overlay, Assembler<RecordingSink>) {
        (Overlay::default(), Assembler::new(RecordingSink::default()))
    }

    #[test]
    fn caps_sets_left_trigger() {
        let (mut overlay, mut out) = setup();
        assert!(overlay.dispatch(usage::CAPS_LOCK, true, &mut out));
        assert!(overlay.active());
        assert!(overlay.dispatch(usage::CAPS_LOCK, false, &mut out));
        assert!(!overlay.active());
        assert!(out.sink().sent.is_empty());
    }

    #[test]
    fn shifted_caps_passes_through_as_tap() {
        let (mut overlay, mut out) = setup();
        out.send_key(usage::SHIFT_LEFT, true);
        assert!(overlay.dispatch(usage::CAPS_LOCK, true, &mut out));
        assert!(!overlay.active());
        let caps = [usage::CAPS_LOCK, 0, 0, 0, 0, 0];
        assert_eq!(
            out.sink().sent,
            vec![
                Sent::Keyboard(0x02, [0; 6]),
                Sent::Keyboard(0x02, caps),
                Sent::Keyboard(0x02, [0; 6]),
            ]
        );
    }

    #[test]
    fn right_trigger_is_level_triggered() {
        let (mut overlay, mut out) = setup();
        assert!(overlay.dispatch(usage::CONTROL_RIGHT, true, &mut out));
        assert!(overlay.active());
        assert!(overlay.dispatch(usage::CONTROL_RIGHT, false, &mut out));
        assert!(!overlay.active());
    }

    #[test]
    fn discrete_action_pulses_on_make_only() {
        let (mut overlay, mut out) = setup();
        overlay.dispatch(usage::CONTROL_RIGHT, true, &mut out);
        assert!(overlay.dispatch(usage::SPACE, true, &mut out));
        assert_eq!(
            out.sink().sent,
            vec![
                Sent::Usage16(REPORT_ID_CONSUMER, consumer::PLAY_PAUSE),
                Sent::Usage16(REPORT_ID_CONSUMER, consumer::NONE),
            ]
        );
        // Break releases the overlay action (a no-op here) and falls
        // through for the literal key.
        assert!(!overlay.dispatch(usage::SPACE, false, &mut out));
        assert_eq!(out.sink().sent.len(), 2);
    }

    #[test]
    fn system_action_sends_one_byte_on_make() {
        let (mut overlay, mut out) = setup();
        overlay.dispatch(usage::CAPS_LOCK, true, &mut out);
        overlay.dispatch(usage::PAUSE, true, &mut out);
        assert_eq!(
            out.sink().sent,
            vec![Sent::Usage8(REPORT_ID_SYSTEM, system::STANDBY)]
        );
        overlay.dispatch(usage::INTL6, true, &mut out);
        assert_eq!(
            out.sink().sent.last(),
            Some(&Sent::Usage8(REPORT_ID_SYSTEM, system::POWER_OFF))
        );
    }

    #[test]
    fn volume_hold_latches_once() {
        let (mut overlay, mut out) = setup();
        overlay.dispatch(usage::CONTROL_RIGHT, true, &mut out);
        overlay.dispatch(usage::ARROW_UP, true, &mut out);
        // Typematic repeat of the held key.
        overlay.dispatch(usage::ARROW_UP, true, &mut out);
        overlay.dispatch(usage::ARROW_UP, true, &mut out);
        assert_eq!(
            out.sink().sent,
            vec![Sent::Usage16(REPORT_ID_CONSUMER, consumer::VOLUME_INCREMENT)]
        );
        overlay.dispatch(usage::ARROW_UP, false, &mut out);
        assert_eq!(
            out.sink().sent.last(),
            Some(&Sent::Usage16(REPORT_ID_CONSUMER, consumer::NONE))
        );
        assert_eq!(out.sink().sent.len(), 2);
    }

    #[test]
    fn volume_break_without_make_is_a_noop() {
        let (mut overlay, mut out) = setup();
        overlay.dispatch(usage::CONTROL_RIGHT, true, &mut out);
        assert!(!overlay.dispatch(usage::ARROW_DOWN, false, &mut out));
        assert!(out.sink().sent.is_empty());
    }

    #[test]
    fn volume_released_after_trigger() {
        // Trigger down, volume down, trigger up, volume up: the latch must
        // still clear even though the overlay is inactive at break time.
        let (mut overlay, mut out) = setup();
        overlay.dispatch(usage::CAPS_LOCK, true, &mut out);
        overlay.dispatch(usage::ARROW_DOWN, true, &mut out);
        overlay.dispatch(usage::CAPS_LOCK, false, &mut out);
        assert!(!overlay.dispatch(usage::ARROW_DOWN, false, &mut out));
        assert_eq!(
            out.sink().sent,
            vec![
                Sent::Usage16(REPORT_ID_CONSUMER, consumer::VOLUME_DECREMENT),
                Sent::Usage16(REPORT_ID_CONSUMER, consumer::NONE),
            ]
        );
    }

    #[test]
    fn unknown_key_under_overlay_is_consumed_on_make() {
        let (mut overlay, mut out) = setup();
        overlay.dispatch(usage::CONTROL_RIGHT, true, &mut out);
        assert!(overlay.dispatch(usage::KEY_A, true, &mut out));
        assert!(!overlay.dispatch(usage::KEY_A, false, &mut out));
        assert!(out.sink().sent.is_empty());
    }
}
