//! Power-on init sequence, as data.
//!
//! The order is fixed by the controller datasheet: the booster and power rails
//! must be up and settled before the panel is configured.

use crate::command::Command;
use crate::lut::RefreshMode;

/// Steps that an init sequence can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep {
    /// Pulse RST with the configured timing
    HardwareReset,
    /// POWER SETTING with the configured power profile
    PowerSetting,
    /// VCM_DC SETTING with the configured power profile
    VcomDcSetting,
    /// RESOLUTION SETTING derived from the panel geometry
    ResolutionSetting,
    /// Send a bare command byte
    Cmd(Command),
    /// Send a command with a static data slice
    CmdData(Command, &'static [u8]),
    DelayMs(u32),
    /// Poll BUSY until the controller is idle
    WaitUntilIdle,
    /// Load one of the waveform sets into the LUT registers
    LoadWaveforms(RefreshMode),
}

pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep::HardwareReset,
    InitStep::PowerSetting,
    InitStep::VcomDcSetting,
    InitStep::CmdData(Command::BoosterSoftStart, &[0x27, 0x27, 0x2F, 0x17]),
    InitStep::Cmd(Command::PowerOn),
    InitStep::DelayMs(100),
    InitStep::WaitUntilIdle,
    // LUT from register, KW mode
    InitStep::CmdData(Command::PanelSetting, &[0x3F]),
    InitStep::ResolutionSetting,
    InitStep::CmdData(Command::DualSpi, &[0x00]),
    InitStep::CmdData(Command::VcomAndDataIntervalSetting, &[0x10, 0x00]),
    InitStep::CmdData(Command::TconSetting, &[0x22]),
    InitStep::CmdData(Command::GateSourceStartSetting, &[0x00, 0x00, 0x00, 0x00]),
    InitStep::LoadWaveforms(RefreshMode::Full),
];

const _: () = assert!(is_well_formed(INIT_SEQUENCE));

/// A sequence is well formed when it starts with the only hardware reset,
/// waits for BUSY after every power on, and ends with the full waveforms loaded.
pub const fn is_well_formed(steps: &[InitStep]) -> bool {
    if steps.is_empty() || !matches!(steps[0], InitStep::HardwareReset) {
        return false;
    }
    if !matches!(
        steps[steps.len() - 1],
        InitStep::LoadWaveforms(RefreshMode::Full)
    ) {
        return false;
    }

    let mut powering_on = false;
    let mut i = 1;
    while i < steps.len() {
        match steps[i] {
            InitStep::HardwareReset => return false,
            InitStep::Cmd(Command::PowerOn) | InitStep::CmdData(Command::PowerOn, _) => {
                powering_on = true
            }
            InitStep::WaitUntilIdle => powering_on = false,
            InitStep::DelayMs(_) => {}
            // nothing may be configured before the power on completes
            _ => {
                if powering_on {
                    return false;
                }
            }
        }
        i += 1;
    }

    !powering_on
}
