//! Static translation tables from legacy scan codes to HID usage codes.
//!
//! The base set is dense enough for a direct-indexed array; the extended
//! set (everything behind the `E0` prefix) is a short sparse list that is
//! only consulted after the prefix byte, so a linear scan is fine.

use crate::bridge::usage::*;

#[rustfmt::skip]
const BASE: [u8; 0x84] = [
    //  x0             x1             x2             x3             x4             x5             x6             x7
    /* 00 */ 0,        F9,            0,             F5,            F3,            F1,            F2,            F12,
    /* 08 */ 0,        F10,           F8,            F6,            F4,            TAB,           GRAVE,         0,
    /* 10 */ 0,        ALT_LEFT,      SHIFT_LEFT,    INTL2,         CONTROL_LEFT,  KEY_Q,         KEY_1,         GUI_LEFT,
    /* 18 */ 0,        0,             KEY_Z,         KEY_S,         KEY_A,         KEY_W,         KEY_2,         GUI_RIGHT,
    /* 20 */ 0,        KEY_C,         KEY_X,         KEY_D,         KEY_E,         KEY_4,         KEY_3,         INTL6,
    /* 28 */ 0,        SPACE,         KEY_V,         KEY_F,         KEY_T,         KEY_R,         KEY_5,         0,
    /* 30 */ 0,        KEY_N,         KEY_B,         KEY_H,         KEY_G,         KEY_Y,         KEY_6,         0,
    /* 38 */ 0,        0,             KEY_M,         KEY_J,         KEY_U,         KEY_7,         KEY_8,         0,
    /* 40 */ 0,        COMMA,         KEY_K,         KEY_I,         KEY_O,         KEY_0,         KEY_9,         0,
    /* 48 */ 0,        PERIOD,        SLASH,         KEY_L,         SEMICOLON,     KEY_P,         MINUS,         0,
    /* 50 */ 0,        INTL1,         APOSTROPHE,    0,             BRACKET_LEFT,  EQUAL,         0,             0,
    /* 58 */ CAPS_LOCK, SHIFT_RIGHT,  ENTER,         BRACKET_RIGHT, 0,             BACKSLASH,     0,             0,
    /* 60 */ 0,        EUROPE_2,      0,             0,             INTL4,         0,             BACKSPACE,     INTL5,
    /* 68 */ 0,        KEYPAD_1,      INTL3,         KEYPAD_4,      KEYPAD_7,      0,             0,             0,
    /* 70 */ KEYPAD_0, KEYPAD_DECIMAL, KEYPAD_2,     KEYPAD_5,      KEYPAD_6,      KEYPAD_8,      ESCAPE,        NUM_LOCK,
    /* 78 */ F11,      KEYPAD_ADD,    KEYPAD_3,      KEYPAD_SUBTRACT, KEYPAD_MULTIPLY, KEYPAD_9,  SCROLL_LOCK,   0,
    /* 80 */ 0,        0,             0,             F7,
];

const EXTENDED: &[(u8, u8)] = &[
    (0x11, ALT_RIGHT),
    (0x14, CONTROL_RIGHT),
    (0x1F, GUI_LEFT),
    (0x27, GUI_RIGHT),
    (0x2F, APPLICATION),
    (0x4A, KEYPAD_DIVIDE),
    (0x5A, KEYPAD_ENTER),
    (0x69, END),
    (0x6B, ARROW_LEFT),
    (0x6C, HOME),
    (0x70, INSERT),
    (0x71, DELETE),
    (0x72, ARROW_DOWN),
    (0x74, ARROW_RIGHT),
    (0x75, ARROW_UP),
    (0x7A, PAGE_DOWN),
    (0x7C, PRINT_SCREEN),
    (0x7D, PAGE_UP),
];

/// Look up a base-set scan code. `None` means the code is unmapped.
pub fn map_base(code: u8) -> Option<u8> {
    match BASE.get(code as usize) {
        Some(&usage) if usage != 0 => Some(usage),
        _ => None,
    }
}

/// Look up a scan code received after the extended prefix.
pub fn map_extended(code: u8) -> Option<u8> {
    EXTENDED
        .iter()
        .find(|&&(scan, _)| scan == code)
        .map(|&(_, usage)| usage)
}
