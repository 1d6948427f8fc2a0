//! Interleaving fast renders with full refreshes.
//!
//! Fast renders leave ghosting behind, so every `cadence` renders one is a full
//! refresh. The render counter can be kept across power cycles through a
//! [`CounterStore`].

use crate::lut::RefreshMode;

/// Opaque byte storage that survives a power cycle.
pub trait CounterStore {
    type Error;

    /// Returns `None` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<[u8; 4]>, Self::Error>;

    fn save(&mut self, bytes: [u8; 4]) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshScheduler {
    cadence: u32,
    count: u32,
}

impl RefreshScheduler {
    /// One full refresh every `cadence` renders, starting with a full one.
    ///
    /// A cadence of 0 or 1 makes every render a full refresh.
    pub fn new(cadence: u32) -> Self {
        Self {
            cadence: cadence.max(1),
            count: 0,
        }
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    /// Renders recorded since the cycle started.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn next_mode(&self) -> RefreshMode {
        if self.count % self.cadence == 0 {
            RefreshMode::Full
        } else {
            RefreshMode::Fast
        }
    }

    /// Record a completed render. A full refresh restarts the cycle.
    pub fn record(&mut self, mode: RefreshMode) {
        self.count = match mode {
            RefreshMode::Full => 1 % self.cadence,
            RefreshMode::Fast => (self.count + 1) % self.cadence,
        };
    }

    /// Picks up the counter saved by [`RefreshScheduler::persist`].
    pub fn restore<S: CounterStore>(&mut self, store: &mut S) -> Result<(), S::Error> {
        self.count = match store.load()? {
            Some(bytes) => u32::from_le_bytes(bytes) % self.cadence,
            None => 0,
        };
        debug!("refresh counter restored at {}/{}", self.count, self.cadence);
        Ok(())
    }

    pub fn persist<S: CounterStore>(&self, store: &mut S) -> Result<(), S::Error> {
        store.save(self.count.to_le_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        bytes: Option<[u8; 4]>,
    }

    impl CounterStore for MemoryStore {
        type Error = ();

        fn load(&mut self) -> Result<Option<[u8; 4]>, ()> {
            Ok(self.bytes)
        }

        fn save(&mut self, bytes: [u8; 4]) -> Result<(), ()> {
            self.bytes = Some(bytes);
            Ok(())
        }
    }

    fn run(scheduler: &mut RefreshScheduler, n: usize) -> Vec<RefreshMode> {
        (0..n)
            .map(|_| {
                let mode = scheduler.next_mode();
                scheduler.record(mode);
                mode
            })
            .collect()
    }

    #[test]
    fn test_full_every_cadence_renders() {
        use RefreshMode::*;
        let mut scheduler = RefreshScheduler::new(4);
        assert_eq!(
            run(&mut scheduler, 9),
            vec![Full, Fast, Fast, Fast, Full, Fast, Fast, Fast, Full]
        );
    }

    #[test]
    fn test_zero_cadence_is_always_full() {
        let mut scheduler = RefreshScheduler::new(0);
        assert_eq!(scheduler.cadence(), 1);
        assert!(run(&mut scheduler, 3)
            .iter()
            .all(|&m| m == RefreshMode::Full));
    }

    #[test]
    fn test_out_of_cadence_full_restarts_cycle() {
        let mut scheduler = RefreshScheduler::new(3);
        scheduler.record(RefreshMode::Full);
        scheduler.record(RefreshMode::Fast);
        scheduler.record(RefreshMode::Full);
        assert_eq!(scheduler.count(), 1);
        assert_eq!(scheduler.next_mode(), RefreshMode::Fast);
    }

    #[test]
    fn test_counter_survives_persist_and_restore() {
        let mut store = MemoryStore::default();
        let mut scheduler = RefreshScheduler::new(5);
        run(&mut scheduler, 3);
        scheduler.persist(&mut store).unwrap();

        let mut rebooted = RefreshScheduler::new(5);
        rebooted.restore(&mut store).unwrap();
        assert_eq!(rebooted.count(), 3);
        assert_eq!(rebooted.next_mode(), RefreshMode::Fast);
    }

    #[test]
    fn test_empty_store_starts_with_full() {
        let mut store = MemoryStore::default();
        let mut scheduler = RefreshScheduler::new(5);
        scheduler.restore(&mut store).unwrap();
        assert_eq!(scheduler.next_mode(), RefreshMode::Full);
    }
}
