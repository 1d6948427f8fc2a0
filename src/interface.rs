//! The display interface for e-Paper displays.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{SpiBus, SpiDevice};

/// Bytes buffered on the stack when writing data from an iterator.
const CHUNK_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    BusWriteError,
    DCError,
    CSError,
    RSTError,
    BUSYError,
}

/// Trait implemented by displays to provide implemenation of core functionality.
pub trait DisplayInterface {
    fn send_command_data(&mut self, command: u8, data: &[u8]) -> Result<(), BusError> {
        self.send_command(command)?;
        self.send_data(data)?;
        Ok(())
    }

    /// Send a command to the controller.
    fn send_command(&mut self, command: u8) -> Result<(), BusError>;

    /// Send data for a command.
    fn send_data(&mut self, data: &[u8]) -> Result<(), BusError>;

    /// Send data via iter, as a single data transaction.
    ///
    /// Returns the number of bytes written.
    fn send_data_from_iter<'a, I>(&mut self, iter: I) -> Result<usize, BusError>
    where
        I: IntoIterator<Item = &'a u8>;

    /// Raw level of the BUSY line. Polarity is controller specific.
    fn is_busy_on(&mut self) -> Result<bool, BusError>;

    /// Hard reset: RST high, low, then high again, sleeping the given
    /// number of milliseconds after each edge.
    fn reset(&mut self, initial_ms: u32, duration_ms: u32, settle_ms: u32) -> Result<(), BusError>;

    fn delay_ms(&mut self, ms: u32);
}

/// Feeds `iter` to `write` in stack-sized chunks.
fn write_chunked<'a, I, F>(iter: I, mut write: F) -> Result<usize, BusError>
where
    I: IntoIterator<Item = &'a u8>,
    F: FnMut(&[u8]) -> Result<(), BusError>,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut filled = 0;
    let mut n = 0;

    for &d in iter {
        chunk[filled] = d;
        filled += 1;
        n += 1;
        if filled == CHUNK_SIZE {
            write(&chunk)?;
            filled = 0;
        }
    }
    if filled > 0 {
        write(&chunk[..filled])?;
    }

    Ok(n)
}

/// EPaperDisplay SPI display interface, with a chip select pin driven by the interface.
pub struct EPDInterface<SPI, CS, DC, RST, BUSY, DELAY> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: DELAY,
}

impl<SPI, CS, DC, RST, BUSY, DELAY> EPDInterface<SPI, CS, DC, RST, BUSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BUSY, delay: DELAY) -> Self {
        EPDInterface {
            spi,
            cs,
            dc,
            rst,
            busy,
            delay,
        }
    }

    /// Consume the display interface and return
    /// the underlying peripherial driver and GPIO pins used by it
    pub fn release(self) -> (SPI, CS, DC, RST, BUSY, DELAY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy, self.delay)
    }

    fn write(&mut self, data_mode: bool, data: &[u8]) -> Result<(), BusError> {
        // Assert chip select pin
        self.cs.set_low().map_err(|_| BusError::CSError)?;

        // 1 = data, 0 = command
        let dc = if data_mode {
            self.dc.set_high()
        } else {
            self.dc.set_low()
        };
        if dc.is_err() {
            self.cs.set_high().ok();
            return Err(BusError::DCError);
        }

        let ret = self
            .spi
            .write(data)
            .and_then(|_| self.spi.flush())
            .map_err(|_| BusError::BusWriteError);

        // Deassert chip select pin
        self.cs.set_high().ok();

        ret
    }
}

impl<SPI, CS, DC, RST, BUSY, DELAY> DisplayInterface for EPDInterface<SPI, CS, DC, RST, BUSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    fn send_command(&mut self, command: u8) -> Result<(), BusError> {
        self.write(false, &[command])
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.write(true, data)
    }

    fn send_data_from_iter<'a, I>(&mut self, iter: I) -> Result<usize, BusError>
    where
        I: IntoIterator<Item = &'a u8>,
    {
        self.cs.set_low().map_err(|_| BusError::CSError)?;
        if self.dc.set_high().is_err() {
            self.cs.set_high().ok();
            return Err(BusError::DCError);
        }

        let spi = &mut self.spi;
        let ret = write_chunked(iter, |chunk| {
            spi.write(chunk).map_err(|_| BusError::BusWriteError)
        })
        .and_then(|n| {
            spi.flush().map_err(|_| BusError::BusWriteError)?;
            Ok(n)
        });

        self.cs.set_high().ok();

        ret
    }

    fn is_busy_on(&mut self) -> Result<bool, BusError> {
        self.busy.is_high().map_err(|_| BusError::BUSYError)
    }

    fn reset(&mut self, initial_ms: u32, duration_ms: u32, settle_ms: u32) -> Result<(), BusError> {
        self.rst.set_high().map_err(|_| BusError::RSTError)?;
        self.delay.delay_ms(initial_ms);

        self.rst.set_low().map_err(|_| BusError::RSTError)?;
        self.delay.delay_ms(duration_ms);

        self.rst.set_high().map_err(|_| BusError::RSTError)?;
        self.delay.delay_ms(settle_ms);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

/// EPaperDisplay SPI display interface, for an [`SpiDevice`] that manages chip select itself.
pub struct EPDInterfaceNoCS<SPI, DC, RST, BUSY, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: DELAY,
}

impl<SPI, DC, RST, BUSY, DELAY> EPDInterfaceNoCS<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, delay: DELAY) -> Self {
        EPDInterfaceNoCS {
            spi,
            dc,
            rst,
            busy,
            delay,
        }
    }

    /// Consume the display interface and return
    /// the underlying peripherial driver and GPIO pins used by it
    pub fn release(self) -> (SPI, DC, RST, BUSY, DELAY) {
        (self.spi, self.dc, self.rst, self.busy, self.delay)
    }
}

impl<SPI, DC, RST, BUSY, DELAY> DisplayInterface for EPDInterfaceNoCS<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    fn send_command(&mut self, command: u8) -> Result<(), BusError> {
        // 1 = data, 0 = command
        self.dc.set_low().map_err(|_| BusError::DCError)?;

        self.spi
            .write(&[command])
            .map_err(|_| BusError::BusWriteError)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.dc.set_high().map_err(|_| BusError::DCError)?;

        self.spi.write(data).map_err(|_| BusError::BusWriteError)
    }

    // Every chunk is its own SPI transaction, CS toggling between chunks is harmless
    // while DC stays high.
    fn send_data_from_iter<'a, I>(&mut self, iter: I) -> Result<usize, BusError>
    where
        I: IntoIterator<Item = &'a u8>,
    {
        self.dc.set_high().map_err(|_| BusError::DCError)?;

        let spi = &mut self.spi;
        write_chunked(iter, |chunk| {
            spi.write(chunk).map_err(|_| BusError::BusWriteError)
        })
    }

    fn is_busy_on(&mut self) -> Result<bool, BusError> {
        self.busy.is_high().map_err(|_| BusError::BUSYError)
    }

    fn reset(&mut self, initial_ms: u32, duration_ms: u32, settle_ms: u32) -> Result<(), BusError> {
        self.rst.set_high().map_err(|_| BusError::RSTError)?;
        self.delay.delay_ms(initial_ms);

        self.rst.set_low().map_err(|_| BusError::RSTError)?;
        self.delay.delay_ms(duration_ms);

        self.rst.set_high().map_err(|_| BusError::RSTError)?;
        self.delay.delay_ms(settle_ms);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn test_command_drives_dc_low_and_toggles_cs() {
        let spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x12]),
            SpiTransaction::flush(),
        ]);
        let cs = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let dc = PinMock::new(&[PinTransaction::set(State::Low)]);
        let rst = PinMock::new(&[]);
        let busy = PinMock::new(&[]);

        let mut di = EPDInterface::new(spi, cs, dc, rst, busy, NoopDelay::new());
        di.send_command(0x12).unwrap();

        let (mut spi, mut cs, mut dc, mut rst, mut busy, _) = di.release();
        spi.done();
        cs.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_iter_data_is_written_in_chunks_under_one_cs() {
        let data = [0xAAu8; CHUNK_SIZE + 6];
        let spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0xAA; CHUNK_SIZE]),
            SpiTransaction::write_vec(vec![0xAA; 6]),
            SpiTransaction::flush(),
        ]);
        let cs = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let dc = PinMock::new(&[PinTransaction::set(State::High)]);
        let rst = PinMock::new(&[]);
        let busy = PinMock::new(&[]);

        let mut di = EPDInterface::new(spi, cs, dc, rst, busy, NoopDelay::new());
        assert_eq!(di.send_data_from_iter(data.iter()).unwrap(), CHUNK_SIZE + 6);

        let (mut spi, mut cs, mut dc, mut rst, mut busy, _) = di.release();
        spi.done();
        cs.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_no_cs_data_and_busy() {
        let spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x07]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xA5]),
            SpiTransaction::transaction_end(),
        ]);
        let dc = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let rst = PinMock::new(&[]);
        let busy = PinMock::new(&[
            PinTransaction::get(State::Low),
            PinTransaction::get(State::High),
        ]);

        let mut di = EPDInterfaceNoCS::new(spi, dc, rst, busy, NoopDelay::new());
        di.send_command_data(0x07, &[0xA5]).unwrap();
        assert!(!di.is_busy_on().unwrap());
        assert!(di.is_busy_on().unwrap());

        let (mut spi, mut dc, mut rst, mut busy, _) = di.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_no_cs_iter_data_is_one_transaction_per_chunk() {
        let data = [0x00u8; CHUNK_SIZE + 6];
        let spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x00; CHUNK_SIZE]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x00; 6]),
            SpiTransaction::transaction_end(),
        ]);
        let dc = PinMock::new(&[PinTransaction::set(State::High)]);
        let rst = PinMock::new(&[]);
        let busy = PinMock::new(&[]);

        let mut di = EPDInterfaceNoCS::new(spi, dc, rst, busy, NoopDelay::new());
        assert_eq!(di.send_data_from_iter(data.iter()).unwrap(), CHUNK_SIZE + 6);

        let (mut spi, mut dc, mut rst, mut busy, _) = di.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }

    #[test]
    fn test_reset_pulses_rst() {
        let spi = SpiMock::<u8>::new(&[]);
        let dc = PinMock::new(&[]);
        let rst = PinMock::new(&[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let busy = PinMock::new(&[]);

        let mut di = EPDInterfaceNoCS::new(spi, dc, rst, busy, NoopDelay::new());
        di.reset(20, 4, 20).unwrap();

        let (mut spi, mut dc, mut rst, mut busy, _) = di.release();
        spi.done();
        dc.done();
        rst.done();
        busy.done();
    }
}
