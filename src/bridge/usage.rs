//! HID usage codes emitted by the bridge.
//!
//! Keyboard-page usages are at the top level; the consumer-control and
//! system-control pages used by the function overlay live in the [`consumer`]
//! and [`system`] submodules.

pub const KEY_A: u8 = 0x04;
pub const KEY_B: u8 = 0x05;
pub const KEY_C: u8 = 0x06;
pub const KEY_D: u8 = 0x07;
pub const KEY_E: u8 = 0x08;
pub const KEY_F: u8 = 0x09;
pub const KEY_G: u8 = 0x0A;
pub const KEY_H: u8 = 0x0B;
pub const KEY_I: u8 = 0x0C;
pub const KEY_J: u8 = 0x0D;
pub const KEY_K: u8 = 0x0E;
pub const KEY_L: u8 = 0x0F;
pub const KEY_M: u8 = 0x10;
pub const KEY_N: u8 = 0x11;
pub const KEY_O: u8 = 0x12;
pub const KEY_P: u8 = 0x13;
pub const KEY_Q: u8 = 0x14;
pub const KEY_R: u8 = 0x15;
pub const KEY_S: u8 = 0x16;
pub const KEY_T: u8 = 0x17;
pub const KEY_U: u8 = 0x18;
pub const KEY_V: u8 = 0x19;
pub const KEY_W: u8 = 0x1A;
pub const KEY_X: u8 = 0x1B;
pub const KEY_Y: u8 = 0x1C;
pub const KEY_Z: u8 = 0x1D;

pub const KEY_1: u8 = 0x1E;
pub const KEY_2: u8 = 0x1F;
pub const KEY_3: u8 = 0x20;
pub const KEY_4: u8 = 0x21;
pub const KEY_5: u8 = 0x22;
pub const KEY_6: u8 = 0x23;
pub const KEY_7: u8 = 0x24;
pub const KEY_8: u8 = 0x25;
pub const KEY_9: u8 = 0x26;
pub const KEY_0: u8 = 0x27;

pub const ENTER: u8 = 0x28;
pub const ESCAPE: u8 = 0x29;
pub const BACKSPACE: u8 = 0x2A;
pub const TAB: u8 = 0x2B;
pub const SPACE: u8 = 0x2C;
pub const MINUS: u8 = 0x2D;
pub const EQUAL: u8 = 0x2E;
pub const BRACKET_LEFT: u8 = 0x2F;
pub const BRACKET_RIGHT: u8 = 0x30;
pub const BACKSLASH: u8 = 0x31;
pub const SEMICOLON: u8 = 0x33;
pub const APOSTROPHE: u8 = 0x34;
pub const GRAVE: u8 = 0x35;
pub const COMMA: u8 = 0x36;
pub const PERIOD: u8 = 0x37;
pub const SLASH: u8 = 0x38;
pub const CAPS_LOCK: u8 = 0x39;

pub const F1: u8 = 0x3A;
pub const F2: u8 = 0x3B;
pub const F3: u8 = 0x3C;
pub const F4: u8 = 0x3D;
pub const F5: u8 = 0x3E;
pub const F6: u8 = 0x3F;
pub const F7: u8 = 0x40;
pub const F8: u8 = 0x41;
pub const F9: u8 = 0x42;
pub const F10: u8 = 0x43;
pub const F11: u8 = 0x44;
pub const F12: u8 = 0x45;

pub const PRINT_SCREEN: u8 = 0x46;
pub const SCROLL_LOCK: u8 = 0x47;
pub const PAUSE: u8 = 0x48;
pub const INSERT: u8 = 0x49;
pub const HOME: u8 = 0x4A;
pub const PAGE_UP: u8 = 0x4B;
pub const DELETE: u8 = 0x4C;
pub const END: u8 = 0x4D;
pub const PAGE_DOWN: u8 = 0x4E;
pub const ARROW_RIGHT: u8 = 0x4F;
pub const ARROW_LEFT: u8 = 0x50;
pub const ARROW_DOWN: u8 = 0x51;
pub const ARROW_UP: u8 = 0x52;

pub const NUM_LOCK: u8 = 0x53;
pub const KEYPAD_DIVIDE: u8 = 0x54;
pub const KEYPAD_MULTIPLY: u8 = 0x55;
pub const KEYPAD_SUBTRACT: u8 = 0x56;
pub const KEYPAD_ADD: u8 = 0x57;
pub const KEYPAD_ENTER: u8 = 0x58;
pub const KEYPAD_1: u8 = 0x59;
pub const KEYPAD_2: u8 = 0x5A;
pub const KEYPAD_3: u8 = 0x5B;
pub const KEYPAD_4: u8 = 0x5C;
pub const KEYPAD_5: u8 = 0x5D;
pub const KEYPAD_6: u8 = 0x5E;
pub const KEYPAD_7: u8 = 0x5F;
pub const KEYPAD_8: u8 = 0x60;
pub const KEYPAD_9: u8 = 0x61;
pub const KEYPAD_0: u8 = 0x62;
pub const KEYPAD_DECIMAL: u8 = 0x63;
pub const EUROPE_2: u8 = 0x64;
pub const APPLICATION: u8 = 0x65;

// International keys of the assumed physical layout. INTL6 is the layout's
// vendor key, which the overlay turns into the power-off action.
pub const INTL1: u8 = 0x87;
pub const INTL2: u8 = 0x88;
pub const INTL3: u8 = 0x89;
pub const INTL4: u8 = 0x8A;
pub const INTL5: u8 = 0x8B;
pub const INTL6: u8 = 0x8C;

pub const CONTROL_LEFT: u8 = 0xE0;
pub const SHIFT_LEFT: u8 = 0xE1;
pub const ALT_LEFT: u8 = 0xE2;
pub const GUI_LEFT: u8 = 0xE3;
pub const CONTROL_RIGHT: u8 = 0xE4;
pub const SHIFT_RIGHT: u8 = 0xE5;
pub const ALT_RIGHT: u8 = 0xE6;
pub const GUI_RIGHT: u8 = 0xE7;

/// Consumer-control page usages for the media overlay.
pub mod consumer {
    /// Neutral usage, released state of every consumer control.
    pub const NONE: u16 = 0x00;
    pub const PLAY: u16 = 0xB0;
    pub const PAUSE: u16 = 0xB1;
    pub const SCAN_NEXT_TRACK: u16 = 0xB5;
    pub const SCAN_PREVIOUS_TRACK: u16 = 0xB6;
    pub const PLAY_PAUSE: u16 = 0xCD;
    pub const MUTE: u16 = 0xE2;
    pub const VOLUME_INCREMENT: u16 = 0xE9;
    pub const VOLUME_DECREMENT: u16 = 0xEA;
}

/// System-control report values for the power overlay actions.
pub mod system {
    pub const POWER_OFF: u8 = 0x01;
    pub const STANDBY: u8 = 0x02;
}
