//! Driver configuration.

use crate::sequence::{InitStep, INIT_SEQUENCE};

/// Voltage selection indices consumed by the power and VCOM_DC settings.
///
/// Byte order: `[_, VSH, VSL, VSHR, VCOM, _, VGH/VGL]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerProfile(pub [u8; 7]);

impl PowerProfile {
    /// Internal DC/DC for VGH/VGL and VSH/VSL, border LDO enabled.
    const POWER_SELECTION: u8 = 0x17;

    pub const fn vsh(&self) -> u8 {
        self.0[1]
    }

    pub const fn vsl(&self) -> u8 {
        self.0[2]
    }

    pub const fn vshr(&self) -> u8 {
        self.0[3]
    }

    pub const fn vcom(&self) -> u8 {
        self.0[4]
    }

    pub const fn vgh_vgl(&self) -> u8 {
        self.0[6]
    }

    /// Payload of the power setting command.
    pub const fn power_setting_payload(&self) -> [u8; 5] {
        [
            Self::POWER_SELECTION,
            self.vgh_vgl(),
            self.vsh(),
            self.vsl(),
            self.vshr(),
        ]
    }
}

impl Default for PowerProfile {
    fn default() -> Self {
        PowerProfile([0x06, 0x3F, 0x3F, 0x11, 0x24, 0x07, 0x17])
    }
}

/// Hardware reset pulse, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetTiming {
    pub initial_ms: u32,
    pub duration_ms: u32,
    pub settle_ms: u32,
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self {
            initial_ms: 20,
            duration_ms: 4,
            settle_ms: 20,
        }
    }
}

#[derive(Clone, Copy, Debug)]
/// EPD Configuration
pub struct Config {
    /// Sleep between two GET_STATUS polls while BUSY is asserted.
    pub busy_poll_interval_ms: u32,
    /// Give up waiting for BUSY after this many polls, `None` waits forever.
    ///
    /// The controller gives no upper bound; a full refresh takes around 4 seconds.
    pub busy_poll_limit: Option<u32>,
    /// Sleep between DISPLAY_REFRESH and the first BUSY poll.
    pub refresh_delay_ms: u32,
    pub reset_timing: ResetTiming,
    pub power_profile: PowerProfile,
    /// Steps run by `initialize`, validated before any bus traffic.
    pub init_sequence: &'static [InitStep],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            busy_poll_interval_ms: 20,
            // 30s at the default interval
            busy_poll_limit: Some(1500),
            refresh_delay_ms: 100,
            reset_timing: ResetTiming::default(),
            power_profile: PowerProfile::default(),
            init_sequence: INIT_SEQUENCE,
        }
    }
}
