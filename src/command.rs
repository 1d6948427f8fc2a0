//! Command Table of the UC8179 controller.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Panel Setting
    ///
    /// <<RES:b2, REG:b1, KW/R:b1, UD:b1, SHL:b1, SHD_N:b1, RST_N:b1>>
    ///
    /// 0x3F: LUT from register, KW mode, scan up, shift right, booster on.
    PanelSetting = 0x00,
    /// Power Setting
    ///
    /// <<0:b3, BD_EN:b1, 0:b2, VSR_EN:b1, VS_EN:b1>>, VGH/VGL, VSH, VSL, VSHR
    PowerSetting = 0x01,
    /// Power OFF, BUSY goes low until the sequence completes.
    PowerOff = 0x02,
    /// Power ON, BUSY goes low until the sequence completes.
    PowerOn = 0x04,
    /// Booster Soft Start, phases A, B, C and the C2 duration.
    BoosterSoftStart = 0x06,
    /// Deep Sleep
    ///
    /// Only accepted with the check code 0xA5.
    DeepSleep = 0x07,
    /// Display Refresh, drives the panel from the frame memory using the resident LUTs.
    DisplayRefresh = 0x12,
    /// Data Start Transmission 2, the "NEW" frame.
    DataStartTransmission2 = 0x13,
    /// Dual SPI mode
    ///
    /// <<0:b2, MM_EN:b1, DUSPI_EN:b1, 0:b4>>
    DualSpi = 0x15,
    /// VCOM LUT, 42 bytes.
    LutVcom = 0x20,
    /// White to white LUT, 42 bytes.
    LutWw = 0x21,
    /// Black to white LUT, 42 bytes.
    LutBw = 0x22,
    /// White to black LUT, 42 bytes.
    LutWb = 0x23,
    /// Black to black LUT, 42 bytes.
    LutBb = 0x24,
    /// VCOM and Data Interval Setting
    ///
    /// <<BDZ:b1, 0:b1, BDV:b2, N2OCP:b1, 0:b1, DDX:b2>>, <<0:b4, CDI:b4>>
    VcomAndDataIntervalSetting = 0x50,
    /// TCON Setting, non-overlap periods of source and gate.
    TconSetting = 0x60,
    /// Resolution Setting
    ///
    /// <<HRES:u16, VRES:u16>>, big endian
    ResolutionSetting = 0x61,
    /// Gate/Source Start Setting, offset of the active window.
    GateSourceStartSetting = 0x65,
    /// Get Status, used while polling BUSY.
    GetStatus = 0x71,
    /// VCOM_DC Setting
    ///
    /// <<0:b2, VDCS:b6>>
    VcmDcSetting = 0x82,
}

impl Command {
    pub const fn code(self) -> u8 {
        self as u8
    }
}
