//! Indicator-LED state on both sides of the bridge.
//!
//! The host reports five indicators in its output report; the keyboard's
//! set-indicators data byte carries four in a different bit order. The
//! compose indicator has no lamp on the device and is dropped in
//! translation.

use std::fmt;

/// Host-side LED state as delivered in the keyboard output report.
///
/// - Bit 0: Num Lock
/// - Bit 1: Caps Lock
/// - Bit 2: Scroll Lock
/// - Bit 3: Compose
/// - Bit 4: Kana
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct HostLeds(u8);

impl HostLeds {
    pub fn from_wire(byte: u8) -> Self {
        HostLeds(byte)
    }

    pub fn is_num(&self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn is_caps(&self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn is_scroll(&self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn is_compose(&self) -> bool {
        self.0 & 0x08 != 0
    }

    pub fn is_kana(&self) -> bool {
        self.0 & 0x10 != 0
    }
}

impl fmt::Debug for HostLeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostLeds({:02X}=", self.0)?;
        let mut first = true;
        for led in [
            ("Num", self.is_num()),
            ("Caps", self.is_caps()),
            ("Scroll", self.is_scroll()),
            ("Compose", self.is_compose()),
            ("Kana", self.is_kana()),
        ] {
            if led.1 {
                if first {
                    first = false;
                } else {
                    write!(f, "+")?;
                }
                write!(f, "{}", led.0)?;
            }
        }
        write!(f, ")")
    }
}

/// Device-side LED state, laid out for the set-indicators data byte.
///
/// - Bit 0: Scroll Lock
/// - Bit 1: Num Lock
/// - Bit 2: Caps Lock
/// - Bit 3: Kana
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceLeds(u8);

impl DeviceLeds {
    pub fn from_wire(byte: u8) -> Self {
        DeviceLeds(byte)
    }

    /// Translate the host layout to the device layout, dropping the
    /// compose indicator.
    pub fn from_host(host: HostLeds) -> Self {
        let mut byte = 0;
        if host.is_scroll() {
            byte |= 0x01;
        }
        if host.is_num() {
            byte |= 0x02;
        }
        if host.is_caps() {
            byte |= 0x04;
        }
        if host.is_kana() {
            byte |= 0x08;
        }
        DeviceLeds(byte)
    }

    pub fn to_wire(self) -> u8 {
        self.0
    }

    pub fn is_scroll(&self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn is_num(&self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn is_caps(&self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn is_kana(&self) -> bool {
        self.0 & 0x08 != 0
    }
}

impl fmt::Debug for DeviceLeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceLeds({:02X}=", self.0)?;
        let mut first = true;
        for led in [
            ("Scroll", self.is_scroll()),
            ("Num", self.is_num()),
            ("Caps", self.is_caps()),
            ("Kana", self.is_kana()),
        ] {
            if led.1 {
                if first {
                    first = false;
                } else {
                    write!(f, "+")?;
                }
                write!(f, "{}", led.0)?;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_reorders_bits() {
        // Host: num + caps + scroll.
        let host = HostLeds::from_wire(0b0_0111);
        let dev = DeviceLeds::from_host(host);
        assert!(dev.is_scroll() && dev.is_num() && dev.is_caps());
        assert!(!dev.is_kana());
        assert_eq!(dev.to_wire(), 0b0111);
    }

    #[test]
    fn compose_is_dropped() {
        let host = HostLeds::from_wire(0b0_1000);
        assert!(host.is_compose());
        assert_eq!(DeviceLeds::from_host(host).to_wire(), 0);
    }

    #[test]
    fn kana_survives() {
        let host = HostLeds::from_wire(0b1_0000);
        let dev = DeviceLeds::from_host(host);
        assert!(dev.is_kana());
        assert_eq!(dev.to_wire(), 0b1000);
    }
}
