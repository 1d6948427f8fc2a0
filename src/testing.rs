//! Recording display interface for protocol tests.

use crate::interface::{BusError, DisplayInterface};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Command(u8),
    Data(Vec<u8>),
    Reset,
    ReadBusy,
    Delay(u32),
}

impl Event {
    /// One GET_STATUS poll.
    pub fn poll(interval_ms: u32) -> [Event; 2] {
        [Event::Command(0x71), Event::Delay(interval_ms)]
    }
}

pub struct RecordingInterface {
    pub log: Vec<Event>,
    busy_reads: u32,
    stuck_busy: bool,
    fail_on_command: Option<u8>,
}

impl RecordingInterface {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            busy_reads: 0,
            stuck_busy: false,
            fail_on_command: None,
        }
    }

    /// Report busy for the next `reads` BUSY reads.
    pub fn busy_for(&mut self, reads: u32) {
        self.busy_reads = reads;
    }

    pub fn stuck_busy(&mut self) {
        self.stuck_busy = true;
    }

    /// Fail the next time `command` is written.
    pub fn fail_on_command(&mut self, command: u8) {
        self.fail_on_command = Some(command);
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn commands(&self) -> Vec<u8> {
        self.log
            .iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.log
            .iter()
            .filter_map(|e| match e {
                Event::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Payload following the `n`th occurrence of `command`.
    pub fn payload_after(&self, command: u8, n: usize) -> Option<&[u8]> {
        let pos = self
            .log
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == Event::Command(command))
            .nth(n)?
            .0;
        match self.log.get(pos + 1) {
            Some(Event::Data(d)) => Some(d.as_slice()),
            _ => None,
        }
    }
}

impl DisplayInterface for RecordingInterface {
    fn send_command(&mut self, command: u8) -> Result<(), BusError> {
        if self.fail_on_command == Some(command) {
            self.fail_on_command = None;
            return Err(BusError::BusWriteError);
        }
        self.log.push(Event::Command(command));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.log.push(Event::Data(data.to_vec()));
        Ok(())
    }

    fn send_data_from_iter<'a, I>(&mut self, iter: I) -> Result<usize, BusError>
    where
        I: IntoIterator<Item = &'a u8>,
    {
        let data: Vec<u8> = iter.into_iter().copied().collect();
        let n = data.len();
        self.log.push(Event::Data(data));
        Ok(n)
    }

    fn is_busy_on(&mut self) -> Result<bool, BusError> {
        self.log.push(Event::ReadBusy);
        if self.stuck_busy {
            return Ok(false);
        }
        if self.busy_reads > 0 {
            self.busy_reads -= 1;
            return Ok(false);
        }
        Ok(true)
    }

    fn reset(&mut self, _initial_ms: u32, _duration_ms: u32, _settle_ms: u32) -> Result<(), BusError> {
        self.log.push(Event::Reset);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Delay(ms));
    }
}
