//! UC8179 driver
//!
//! For:
//! - Waveshare 7.5inch e-Paper V2, 800 x 480, B/W
//!
//! BUSY is low while the controller works. It is polled with GET_STATUS,
//! which keeps the status register fresh.

use core::iter;

use crate::command::Command;
use crate::config::Config;
use crate::display::PanelGeometry;
use crate::error::DriverError;
use crate::interface::DisplayInterface;
use crate::lut::WaveformSet;
use crate::sequence::InitStep;

/// Check code required by DEEP SLEEP, any other value is ignored by the controller.
pub const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;

/// 800 source x 480 gate, B/W
pub struct UC8179;

impl UC8179 {
    pub fn busy_wait<DI: DisplayInterface>(di: &mut DI, config: &Config) -> Result<(), DriverError> {
        let mut polls = 0;

        // negative logic
        while !di.is_busy_on()? {
            if let Some(limit) = config.busy_poll_limit {
                if polls >= limit {
                    warn!("BUSY still asserted after {} polls", polls);
                    return Err(DriverError::HardwareTimeout { polls });
                }
            }
            di.send_command(Command::GetStatus.code())?;
            di.delay_ms(config.busy_poll_interval_ms);
            polls += 1;
        }

        if polls > 0 {
            trace!("busy released after {} polls", polls);
        }
        Ok(())
    }

    pub fn hardware_reset<DI: DisplayInterface>(di: &mut DI, config: &Config) -> Result<(), DriverError> {
        let t = config.reset_timing;
        di.reset(t.initial_ms, t.duration_ms, t.settle_ms)?;
        Ok(())
    }

    /// Runs the steps of an init sequence in order.
    pub fn run_sequence<DI: DisplayInterface>(
        di: &mut DI,
        config: &Config,
        geometry: &PanelGeometry,
        steps: &[InitStep],
    ) -> Result<(), DriverError> {
        for step in steps {
            match *step {
                InitStep::HardwareReset => Self::hardware_reset(di, config)?,
                InitStep::PowerSetting => di.send_command_data(
                    Command::PowerSetting.code(),
                    &config.power_profile.power_setting_payload(),
                )?,
                InitStep::VcomDcSetting => di.send_command_data(
                    Command::VcmDcSetting.code(),
                    &[config.power_profile.vcom()],
                )?,
                InitStep::ResolutionSetting => di.send_command_data(
                    Command::ResolutionSetting.code(),
                    &geometry.resolution_payload(),
                )?,
                InitStep::Cmd(cmd) => di.send_command(cmd.code())?,
                InitStep::CmdData(cmd, data) => di.send_command_data(cmd.code(), data)?,
                InitStep::DelayMs(ms) => di.delay_ms(ms),
                InitStep::WaitUntilIdle => Self::busy_wait(di, config)?,
                InitStep::LoadWaveforms(mode) => Self::update_waveforms(di, mode.waveforms())?,
            }
        }
        Ok(())
    }

    /// Loads VCOM, WW, BW, WB and BB, in that order.
    pub fn update_waveforms<DI: DisplayInterface>(
        di: &mut DI,
        waveforms: &WaveformSet,
    ) -> Result<(), DriverError> {
        for (cmd, table) in waveforms.entries() {
            di.send_command_data(cmd.code(), table.as_bytes())?;
        }
        Ok(())
    }

    pub fn update_frame<DI: DisplayInterface>(di: &mut DI, buffer: &[u8]) -> Result<(), DriverError> {
        di.send_command(Command::DataStartTransmission2.code())?;
        di.send_data(buffer)?;
        Ok(())
    }

    /// Fills the NEW frame with `len` zero bytes.
    pub fn clear_frame<DI: DisplayInterface>(di: &mut DI, len: usize) -> Result<(), DriverError> {
        di.send_command(Command::DataStartTransmission2.code())?;
        di.send_data_from_iter(iter::repeat(&0x00).take(len))?;
        Ok(())
    }

    pub fn turn_on_display<DI: DisplayInterface>(di: &mut DI, config: &Config) -> Result<(), DriverError> {
        di.send_command(Command::DisplayRefresh.code())?;
        di.delay_ms(config.refresh_delay_ms);
        Self::busy_wait(di, config)
    }

    pub fn sleep<DI: DisplayInterface>(di: &mut DI, config: &Config) -> Result<(), DriverError> {
        di.send_command(Command::PowerOff.code())?;
        Self::busy_wait(di, config)?;

        di.send_command_data(Command::DeepSleep.code(), &[DEEP_SLEEP_CHECK_CODE])?;
        Ok(())
    }
}
