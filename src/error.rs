use core::fmt;

use crate::interface::BusError;
use crate::DriverState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// The transport failed, the operation was aborted.
    Bus(BusError),
    /// Frame buffer length does not match the panel, nothing was sent.
    GeometryMismatch { expected: usize, actual: usize },
    /// Operation not allowed in the current state, nothing was sent.
    InvalidState { state: DriverState },
    /// BUSY stayed asserted for the whole poll budget.
    ///
    /// The panel may be left mid refresh, recover with a hardware reset
    /// followed by `initialize`.
    HardwareTimeout { polls: u32 },
    /// The configured init sequence is not well formed, nothing was sent.
    InvalidSequence,
}

impl From<BusError> for DriverError {
    fn from(e: BusError) -> Self {
        DriverError::Bus(e)
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Bus(e) => write!(f, "bus error: {:?}", e),
            DriverError::GeometryMismatch { expected, actual } => write!(
                f,
                "frame buffer is {} bytes, panel expects {}",
                actual, expected
            ),
            DriverError::InvalidState { state } => {
                write!(f, "operation not allowed while {:?}", state)
            }
            DriverError::HardwareTimeout { polls } => {
                write!(f, "panel still busy after {} polls", polls)
            }
            DriverError::InvalidSequence => write!(f, "malformed init sequence"),
        }
    }
}

impl core::error::Error for DriverError {}
