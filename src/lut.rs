//! Waveform Look Up Tables(LUT), which define the display driving waveform settings.
//!
//! # LUT Table
//!
//! Each table holds 7 groups of 6 bytes:
//!
//! <<LEVEL_SELECT:u8, TP_A:u8, TP_B:u8, TP_C:u8, TP_D:u8, RP:u8>>
//!
//! - LEVEL_SELECT packs the voltage of the 4 sub-phases A..D, 2 bits each:
//!   - 00 – GND
//!   - 01 – VDH
//!   - 10 – VDL
//!   - 11 – floating
//! - TP[#] is the sub-phase period in frames, 0 skips the sub-phase.
//! - RP is the repeat count of the group.
//!
//! The VCOM table uses the same layout with VCOM levels instead of source levels.

use crate::command::Command;

/// Length in bytes of every waveform table.
pub const LUT_LEN: usize = 42;

/// One 42-byte waveform table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveformTable([u8; LUT_LEN]);

impl WaveformTable {
    pub const fn new(data: [u8; LUT_LEN]) -> Self {
        Self(data)
    }

    pub const fn as_bytes(&self) -> &[u8; LUT_LEN] {
        &self.0
    }
}

/// Role of a table, in the order the controller expects them to be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LutRole {
    Vcom,
    WhiteToWhite,
    BlackToWhite,
    WhiteToBlack,
    BlackToBlack,
}

impl LutRole {
    pub const ALL: [LutRole; 5] = [
        LutRole::Vcom,
        LutRole::WhiteToWhite,
        LutRole::BlackToWhite,
        LutRole::WhiteToBlack,
        LutRole::BlackToBlack,
    ];

    pub const fn command(self) -> Command {
        match self {
            LutRole::Vcom => Command::LutVcom,
            LutRole::WhiteToWhite => Command::LutWw,
            LutRole::BlackToWhite => Command::LutBw,
            LutRole::WhiteToBlack => Command::LutWb,
            LutRole::BlackToBlack => Command::LutBb,
        }
    }
}

/// A complete set of the 5 tables needed for one refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveformSet {
    pub vcom: WaveformTable,
    pub ww: WaveformTable,
    pub bw: WaveformTable,
    pub wb: WaveformTable,
    pub bb: WaveformTable,
}

impl WaveformSet {
    pub const fn table(&self, role: LutRole) -> &WaveformTable {
        match role {
            LutRole::Vcom => &self.vcom,
            LutRole::WhiteToWhite => &self.ww,
            LutRole::BlackToWhite => &self.bw,
            LutRole::WhiteToBlack => &self.wb,
            LutRole::BlackToBlack => &self.bb,
        }
    }

    /// `(command, table)` pairs in load order.
    pub fn entries(&self) -> impl Iterator<Item = (Command, &WaveformTable)> {
        LutRole::ALL
            .into_iter()
            .map(move |role| (role.command(), self.table(role)))
    }
}

/// Which waveform set drives a refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshMode {
    /// Flash-heavy waveform, best quality, clears ghosting.
    Full,
    /// Fewer flashes, quicker. Ghosting accumulates, a full refresh should be done occasionally.
    Fast,
}

impl RefreshMode {
    pub const fn waveforms(self) -> &'static WaveformSet {
        match self {
            RefreshMode::Full => &FULL_WAVEFORMS,
            RefreshMode::Fast => &FAST_WAVEFORMS,
        }
    }
}

#[rustfmt::skip]
pub const FULL_WAVEFORMS: WaveformSet = WaveformSet {
    vcom: WaveformTable::new([
        0x00, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x00, 0x0F, 0x01, 0x0F, 0x01, 0x02,
        0x00, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    ww: WaveformTable::new([
        0x10, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
        0x20, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    bw: WaveformTable::new([
        0x10, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
        0x20, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    wb: WaveformTable::new([
        0x80, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
        0x40, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    bb: WaveformTable::new([
        0x80, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02,
        0x40, 0x0F, 0x0F, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
};

// single group, 14 frames per sub-phase
#[rustfmt::skip]
pub const FAST_WAVEFORMS: WaveformSet = WaveformSet {
    vcom: WaveformTable::new([
        0x00, 0x0E, 0x0E, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    ww: WaveformTable::new([
        0xA0, 0x0E, 0x0E, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    bw: WaveformTable::new([
        0xA0, 0x0E, 0x0E, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    wb: WaveformTable::new([
        0x50, 0x0E, 0x0E, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
    bb: WaveformTable::new([
        0x50, 0x0E, 0x0E, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]),
};
