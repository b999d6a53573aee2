//! Byte values of the legacy scan-code line protocol.
//!
//! The keyboard speaks scan-code set 2: make codes are sent bare, break
//! codes are prefixed with [`ind::BREAK`], and the navigation cluster is
//! reached through the [`ind::EXT0`] prefix. The Pause key is its own
//! two-byte compound behind [`ind::EXT1`].
#![allow(unused)]

/// Commands sent from the adapter to the keyboard.
pub mod cmd {
    /// Set the indicator LEDs; the keyboard acks, then expects one data byte.
    pub const SET_INDICATORS: u8 = 0xED;
    /// Liveness probe; a healthy keyboard answers with the same byte.
    pub const ECHO: u8 = 0xEE;
}

/// Indicator bytes sent from the keyboard to the adapter.
pub mod ind {
    /// Receive buffer overrun on the keyboard side.
    pub const OVERRUN: u8 = 0x00;
    /// Power-on self test finished without error.
    pub const SELF_TEST_PASSED: u8 = 0xAA;
    /// Extended-set prefix: the next byte is looked up in the extended table.
    pub const EXT0: u8 = 0xE0;
    /// Pause-key prefix: starts the two-byte Pause compound sequence.
    pub const EXT1: u8 = 0xE1;
    /// Response to [`super::cmd::ECHO`].
    pub const ECHO: u8 = 0xEE;
    /// The next code is a key release rather than a key press.
    pub const BREAK: u8 = 0xF0;
    /// Command acknowledge.
    pub const ACK: u8 = 0xFA;
    /// Power-on self test failed.
    pub const SELF_TEST_FAILED: u8 = 0xFC;
    /// The keyboard asks for the last command again.
    pub const RESEND: u8 = 0xFE;
}

/// Scan codes that the decoder treats specially, ahead of table lookup.
pub mod key {
    /// Left shift; also the phantom shift the keyboard fabricates around
    /// some extended sequences.
    pub const L_SHIFT: u8 = 0x12;
    /// Left control; doubles as the intermediate byte of the Pause compound.
    pub const L_CTRL: u8 = 0x14;
    /// Terminal byte of the Pause compound sequence.
    pub const PAUSE: u8 = 0x77;
    /// Right shift (phantom variant after the extended prefix).
    pub const R_SHIFT: u8 = 0x59;
    /// Break half of the Pause/Break key, sent after the extended prefix.
    pub const CTRL_BREAK: u8 = 0x7E;
    /// Compound code the keyboard emits for Alt+PrintScreen.
    pub const ALT_PRINT_SCREEN: u8 = 0x84;
}
