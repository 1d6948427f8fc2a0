//! Driver for the Waveshare 7.5inch e-Paper V2 (UC8179, 800 x 480, B/W).
//!
//! The caller supplies frames already packed at 1 bit per pixel, see
//! [`display`] for the layout. Two refresh modes are available: a full
//! refresh, and a fast refresh with fewer flashes that leaves ghosting behind.
//! [`refresh::RefreshScheduler`] decides when to interleave the two.
//!
//! ```ignore
//! let mut epd = Epd7in5V2::new(EPDInterfaceNoCS::new(spi, dc, rst, busy, delay));
//! epd.initialize()?;
//!
//! let geometry = epd.geometry();
//! let mut frame = [0u8; EPD_7IN5_V2.buffer_len()];
//! if let Some((offset, mask)) = geometry.bit_position(10, 20) {
//!     frame[offset] |= mask;
//! }
//! epd.render_full(&frame)?;
//! epd.render_fast(&next_frame)?;
//! epd.sleep()?;
//! ```
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod display;
pub mod drivers;
pub mod error;
pub mod interface;
pub mod lut;
pub mod refresh;
pub mod sequence;

#[cfg(test)]
mod testing;

pub use config::{Config, PowerProfile, ResetTiming};
pub use display::{PanelGeometry, EPD_7IN5_V2};
pub use drivers::UC8179;
pub use error::DriverError;
pub use interface::{BusError, DisplayInterface, EPDInterface, EPDInterfaceNoCS};
pub use lut::RefreshMode;

/// Lifecycle of the panel as seen by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Powered up or reset, waiting for `initialize`.
    Uninitialized,
    /// Initialized, renders are accepted.
    Ready,
    /// In deep sleep, only a hardware reset wakes the controller.
    Asleep,
    /// Init failed or the panel stopped responding, only a hardware reset recovers.
    Faulted,
}

enum Frame<'a> {
    Buffer(&'a [u8]),
    Blank,
}

/// The 7.5inch V2 panel, driven through a [`DisplayInterface`].
pub struct Epd7in5V2<DI: DisplayInterface> {
    interface: DI,
    config: Config,
    state: DriverState,
    /// Waveform set held by the LUT registers, `None` when unknown.
    resident: Option<RefreshMode>,
}

impl<DI: DisplayInterface> Epd7in5V2<DI> {
    /// Driver with the default [`Config`]. Nothing is sent until `initialize`.
    pub fn new(interface: DI) -> Self {
        Self::with_config(interface, Config::default())
    }

    /// Driver with custom timings, power profile or init sequence.
    pub fn with_config(interface: DI, config: Config) -> Self {
        Self {
            interface,
            config,
            state: DriverState::Uninitialized,
            resident: None,
        }
    }

    pub fn geometry(&self) -> PanelGeometry {
        EPD_7IN5_V2
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resident_waveforms(&self) -> Option<RefreshMode> {
        self.resident
    }

    /// Give back the display interface.
    pub fn release(self) -> DI {
        self.interface
    }

    /// Reset, power on and configure the panel, then load the full waveforms.
    ///
    /// Any failure leaves the driver [`DriverState::Faulted`].
    pub fn initialize(&mut self) -> Result<(), DriverError> {
        self.require(DriverState::Uninitialized)?;
        if !sequence::is_well_formed(self.config.init_sequence) {
            return Err(DriverError::InvalidSequence);
        }

        info!("initializing panel");
        self.resident = None;
        let geometry = self.geometry();
        match UC8179::run_sequence(
            &mut self.interface,
            &self.config,
            &geometry,
            self.config.init_sequence,
        ) {
            Ok(()) => {
                self.resident = Some(RefreshMode::Full);
                self.state = DriverState::Ready;
                Ok(())
            }
            Err(e) => {
                warn!("init failed: {}", e);
                self.state = DriverState::Faulted;
                Err(e)
            }
        }
    }

    /// Pulse RST. Returns the driver to [`DriverState::Uninitialized`] from any state.
    pub fn hardware_reset(&mut self) -> Result<(), DriverError> {
        UC8179::hardware_reset(&mut self.interface, &self.config)?;
        self.state = DriverState::Uninitialized;
        self.resident = None;
        Ok(())
    }

    /// Load a waveform set into the LUT registers.
    pub fn load_waveform_tables(&mut self, mode: RefreshMode) -> Result<(), DriverError> {
        self.require(DriverState::Ready)?;
        self.load_waveforms(mode)
    }

    /// Full refresh. The full waveforms are reloaded on every call.
    pub fn render_full(&mut self, buffer: &[u8]) -> Result<(), DriverError> {
        self.check_frame(buffer)?;
        self.require(DriverState::Ready)?;
        debug!("full refresh");

        self.load_waveforms(RefreshMode::Full)?;
        self.display_frame(Frame::Buffer(buffer))
    }

    /// Fast refresh. The full waveforms are loaded back once the refresh completes.
    pub fn render_fast(&mut self, buffer: &[u8]) -> Result<(), DriverError> {
        self.check_frame(buffer)?;
        self.require(DriverState::Ready)?;
        debug!("fast refresh");

        self.load_waveforms(RefreshMode::Fast)?;
        self.display_frame(Frame::Buffer(buffer))?;
        self.load_waveforms(RefreshMode::Full)
    }

    /// Render with the given mode, typically [`refresh::RefreshScheduler::next_mode`].
    pub fn render(&mut self, buffer: &[u8], mode: RefreshMode) -> Result<(), DriverError> {
        match mode {
            RefreshMode::Full => self.render_full(buffer),
            RefreshMode::Fast => self.render_fast(buffer),
        }
    }

    /// Refresh the panel from an all-zero frame.
    pub fn clear(&mut self) -> Result<(), DriverError> {
        self.require(DriverState::Ready)?;
        debug!("clear");

        if self.resident != Some(RefreshMode::Full) {
            self.load_waveforms(RefreshMode::Full)?;
        }
        self.display_frame(Frame::Blank)
    }

    /// Power off and enter deep sleep.
    pub fn sleep(&mut self) -> Result<(), DriverError> {
        self.require(DriverState::Ready)?;
        info!("entering deep sleep");

        let ret = UC8179::sleep(&mut self.interface, &self.config);
        self.settle(ret)?;
        self.state = DriverState::Asleep;
        Ok(())
    }

    fn require(&self, state: DriverState) -> Result<(), DriverError> {
        if self.state != state {
            return Err(DriverError::InvalidState { state: self.state });
        }
        Ok(())
    }

    fn check_frame(&self, buffer: &[u8]) -> Result<(), DriverError> {
        let expected = self.geometry().buffer_len();
        if buffer.len() != expected {
            return Err(DriverError::GeometryMismatch {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(())
    }

    fn load_waveforms(&mut self, mode: RefreshMode) -> Result<(), DriverError> {
        self.resident = None;
        UC8179::update_waveforms(&mut self.interface, mode.waveforms())?;
        self.resident = Some(mode);
        Ok(())
    }

    fn display_frame(&mut self, frame: Frame<'_>) -> Result<(), DriverError> {
        match frame {
            Frame::Buffer(buffer) => UC8179::update_frame(&mut self.interface, buffer)?,
            Frame::Blank => {
                let len = self.geometry().buffer_len();
                UC8179::clear_frame(&mut self.interface, len)?
            }
        }
        let ret = UC8179::turn_on_display(&mut self.interface, &self.config);
        self.settle(ret)
    }

    /// A panel that stopped answering needs a reset before anything else.
    fn settle(&mut self, ret: Result<(), DriverError>) -> Result<(), DriverError> {
        if let Err(DriverError::HardwareTimeout { .. }) = ret {
            self.state = DriverState::Faulted;
            self.resident = None;
        }
        ret
    }
}
