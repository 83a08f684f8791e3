//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays on a 4-wire SPI bus. The
//! data/command line (A0) selects whether a transfer is a command (low) or
//! display RAM data (high). The reset line (RESN) is active low.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use tracing::debug;

use crate::backend::{DisplayBackend, DisplayError};
use crate::framebuffer::{Framebuffer, PAGES};

/// SH1106 RAM is 132 columns wide; a 128 column panel sits at offset 2
const COLUMN_OFFSET: u8 = 2;

/// Length of the reset pulse and the settle time after it
const RESET_PULSE_MS: u32 = 10;

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Initialization sequence for SH1106
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,                  // Enable charge pump
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF, // High contrast
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 OLED driver
pub struct Sh1106<SPI, DC> {
    spi: SPI,
    dc: DC,
    initialized: bool,
}

impl<SPI, DC> Sh1106<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new SH1106 driver
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            initialized: false,
        }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.command(INIT_SEQUENCE)?;
        self.initialized = true;
        debug!("SH1106 initialized");
        Ok(())
    }

    /// Pulse the reset line
    ///
    /// The controller loses its configuration; `init` must run again.
    pub fn hard_reset<RST, D>(&mut self, rst: &mut RST, delay: &mut D) -> Result<(), DisplayError>
    where
        RST: OutputPin,
        D: DelayNs,
    {
        rst.set_high().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(1);
        rst.set_low().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        rst.set_high().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);

        self.initialized = false;
        debug!("SH1106 reset");
        Ok(())
    }

    /// Send command bytes (A0 low)
    fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Pin)?;
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::Communication)
    }

    /// Send display RAM bytes (A0 high)
    fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::Pin)?;
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, DC> DisplayBackend for Sh1106<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn flush(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        for page in 0..PAGES {
            self.command(&[
                cmd::SET_PAGE_ADDR | page as u8,
                cmd::SET_LOW_COLUMN | COLUMN_OFFSET,
                cmd::SET_HIGH_COLUMN,
            ])?;
            self.data(frame.page(page))?;
        }

        Ok(())
    }

    fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let c = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.command(&[c])
    }
}
