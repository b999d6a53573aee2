//! Scan-code to HID bridge core.
//!
//! [`Bridge`] owns the byte-driven decoder state machine and ties the queue,
//! mapping, overlay, report and LED layers together. It is driven by
//! repeated calls to [`Bridge::poll`] from a single cooperative context;
//! the only state shared with the asynchronous receive side is the
//! [`queue::ScanQueue`] handle.

pub mod codes;
pub mod keymap;
pub mod led;
pub mod overlay;
pub mod queue;
pub mod report;
pub mod usage;

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use self::codes::{cmd, ind, key};
use self::led::{DeviceLeds, HostLeds};
use self::overlay::Overlay;
use self::queue::ScanQueue;
use self::report::{Assembler, REPORT_ID_KEYBOARD, ReportSink, ReportType};

/// How long to wait in the handshake states before giving up on the device.
const ACK_TIMEOUT: Duration = Duration::from_millis(300);

/// Default interval for the bring-up liveness probe.
pub const PROBE_INTERVAL: Duration = Duration::from_millis(500);

/// Line-protocol collaborator: carries command and data bytes toward the
/// keyboard. The receive direction does not appear here; the line driver is
/// handed a cloned [`ScanQueue`] and calls `put` from its own context.
pub trait LineLink {
    fn send(&mut self, byte: u8);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Bring-up only: nothing heard from the device yet.
    Idle,
    Base,
    BreakPending,
    Ext0,
    Ext0BreakPending,
    Ext1,
    Ext1BreakPending,
    LedWaitAck,
    WaitAck,
}

/// Outcome of a poll step, hinting the caller's idle strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Normal operation; poll again soon.
    Active,
    /// Link suspended with no input pending; a long sleep is appropriate.
    Suspended,
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Bring-up liveness probe interval. `None` disables the probe and the
    /// decoder starts directly in its base state.
    pub probe_interval: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            probe_interval: Some(PROBE_INTERVAL),
        }
    }
}

pub struct Bridge<L, S> {
    line: L,
    out: Assembler<S>,
    overlay: Overlay,
    queue: ScanQueue,
    probe_interval: Option<Duration>,

    state: State,
    /// Entry time of the current state; meaningful for the handshake states
    /// and for the bring-up probe timer.
    state_entered: Instant,

    pending_led_sync: bool,
    host_leds: HostLeds,
    device_leds: DeviceLeds,
}

impl<L: LineLink, S: ReportSink> Bridge<L, S> {
    pub fn new(line: L, sink: S, config: BridgeConfig) -> Self {
        Self {
            line,
            out: Assembler::new(sink),
            overlay: Overlay::default(),
            queue: ScanQueue::new(),
            probe_interval: config.probe_interval,
            state: if config.probe_interval.is_some() {
                State::Idle
            } else {
                State::Base
            },
            state_entered: Instant::now(),
            pending_led_sync: false,
            host_leds: HostLeds::default(),
            device_leds: DeviceLeds::default(),
        }
    }

    /// Handle for the line driver's receive context.
    pub fn queue(&self) -> ScanQueue {
        self.queue.clone()
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        self.out.sink()
    }

    /// Deliver a host output report. Only the keyboard report's LED byte is
    /// of interest; everything else is ignored.
    pub fn host_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]) {
        if report_id != REPORT_ID_KEYBOARD || report_type != ReportType::Output {
            return;
        }
        let Some(&byte) = data.first() else {
            return;
        };
        self.host_leds = HostLeds::from_wire(byte);
        debug!("host leds {:?}", self.host_leds);
        let derived = DeviceLeds::from_host(self.host_leds);
        if derived != self.device_leds {
            self.device_leds = derived;
            self.pending_led_sync = true;
        }
    }

    /// One step of the bridge: self-heal a stuck handshake, kick a pending
    /// LED sync, and decode at most one queued byte.
    pub fn poll(&mut self, now: Instant) -> PollStatus {
        if self.out.sink().suspended() {
            if !self.queue.is_empty() {
                self.out.sink_mut().request_wake();
                return PollStatus::Active;
            }
            return PollStatus::Suspended;
        }

        // The timeout runs whether or not bytes arrive; an unplugged device
        // must not park the decoder in a handshake state.
        if matches!(self.state, State::LedWaitAck | State::WaitAck)
            && now.duration_since(self.state_entered) > ACK_TIMEOUT
        {
            warn!("indicator ack timeout, decoder reverted to base");
            self.pending_led_sync = false;
            self.state = State::Base;
        }

        if self.state == State::Idle {
            if let Some(interval) = self.probe_interval {
                if now.duration_since(self.state_entered) > interval {
                    debug!("nothing heard from device, sending liveness probe");
                    self.line.send(cmd::ECHO);
                    self.state_entered = now;
                }
            }
        }

        if !self.out.sink().ready() {
            return PollStatus::Active;
        }

        if self.state == State::Base && self.pending_led_sync {
            self.line.send(cmd::SET_INDICATORS);
            self.state = State::LedWaitAck;
            self.state_entered = now;
        }

        if let Some(byte) = self.queue.get() {
            trace!("line < {byte:02X}");
            self.state = match self.state {
                State::Idle => {
                    debug!("first byte from device");
                    self.on_base(byte)
                }
                State::Base => self.on_base(byte),
                State::BreakPending => self.on_break_pending(byte),
                State::Ext0 => self.on_ext0(byte),
                State::Ext0BreakPending => self.on_ext0_break_pending(byte),
                State::Ext1 => self.on_ext1(byte),
                State::Ext1BreakPending => self.on_ext1_break_pending(byte),
                State::LedWaitAck => self.on_led_wait_ack(byte, now),
                State::WaitAck => self.on_wait_ack(byte),
            };
        }

        PollStatus::Active
    }

    fn on_base(&mut self, byte: u8) -> State {
        match byte {
            ind::BREAK => State::BreakPending,
            ind::EXT0 => State::Ext0,
            ind::EXT1 => State::Ext1,
            ind::SELF_TEST_PASSED | ind::ECHO => {
                debug!("device alive ({byte:02X}), scheduling indicator sync");
                self.pending_led_sync = true;
                State::Base
            }
            _ => {
                self.handle_base_code(byte, true);
                State::Base
            }
        }
    }

    fn on_break_pending(&mut self, byte: u8) -> State {
        self.handle_base_code(byte, false);
        State::Base
    }

    fn on_ext0(&mut self, byte: u8) -> State {
        if byte == ind::BREAK {
            return State::Ext0BreakPending;
        }
        self.handle_ext0_code(byte, true);
        State::Base
    }

    fn on_ext0_break_pending(&mut self, byte: u8) -> State {
        self.handle_ext0_code(byte, false);
        State::Base
    }

    fn on_ext1(&mut self, byte: u8) -> State {
        match byte {
            ind::BREAK => State::Ext1BreakPending,
            // First half of the Pause compound; the terminal byte follows.
            key::L_CTRL => State::Ext1,
            key::PAUSE => {
                self.dispatch(usage::PAUSE, true);
                State::Base
            }
            _ => {
                warn!("unexpected {byte:02X} in pause make sequence");
                State::Base
            }
        }
    }

    fn on_ext1_break_pending(&mut self, byte: u8) -> State {
        match byte {
            key::L_CTRL => State::Ext1,
            key::PAUSE => {
                self.dispatch(usage::PAUSE, false);
                State::Base
            }
            _ => {
                warn!("unexpected {byte:02X} in pause break sequence");
                State::Base
            }
        }
    }

    fn on_led_wait_ack(&mut self, byte: u8, now: Instant) -> State {
        if byte == ind::ACK {
            self.line.send(self.device_leds.to_wire());
            self.pending_led_sync = false;
            self.state_entered = now;
            return State::WaitAck;
        }
        State::LedWaitAck
    }

    fn on_wait_ack(&mut self, byte: u8) -> State {
        if byte == ind::ACK {
            return State::Base;
        }
        State::WaitAck
    }

    fn handle_base_code(&mut self, code: u8, make: bool) {
        if code == key::ALT_PRINT_SCREEN {
            self.out
                .send_key_with_mod(usage::PRINT_SCREEN, usage::ALT_LEFT, make);
            return;
        }
        match keymap::map_base(code) {
            Some(mapped) => self.dispatch(mapped, make),
            None => debug!("unmapped base code {code:02X} ({})", mb(make)),
        }
    }

    fn handle_ext0_code(&mut self, code: u8, make: bool) {
        // The keyboard fabricates shift make/break pairs around some
        // extended sequences; they carry no information.
        if code == key::L_SHIFT || code == key::R_SHIFT {
            trace!("phantom shift after extended prefix ignored");
            return;
        }
        if code == key::CTRL_BREAK {
            // Pause/Break: carries an implicit left-ctrl alongside Pause.
            if !self.overlay.dispatch(usage::PAUSE, make, &mut self.out) {
                self.out
                    .send_key_with_mod(usage::PAUSE, usage::CONTROL_LEFT, make);
            }
            return;
        }
        match keymap::map_extended(code) {
            Some(mapped) => self.dispatch(mapped, make),
            None => warn!("unexpected code {code:02X} after extended prefix ({})", mb(make)),
        }
    }

    fn dispatch(&mut self, mapped: u8, make: bool) {
        if !self.overlay.dispatch(mapped, make, &mut self.out) {
            self.out.send_key(mapped, make);
        }
    }
}

fn mb(make: bool) -> &'static str {
    if make { "make" } else { "break" }
}
