//! Raspberry Pi wiring
//!
//! The SH1106 panel sits on spidev with A0 (data/command) and RESN driven
//! from GPIO. The three push buttons are active low with pull-ups; their
//! falling edges are handled on rppal's interrupt threads and routed the
//! same way as keyboard input.

use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use embassy_time::{Duration, Instant};
use ngrush_display::Sh1106;
use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};
use rppal::hal::Delay;
use rppal::spi::{Bus, Mode, SimpleHalSpiDevice, SlaveSelect, Spi};
use tracing::info;

use crate::config::loader::GpioSettings;
use crate::error::AppError;
use crate::tasks::input::{InputRouter, InputSink};

/// The panel as wired on the Pi
pub type PiDisplay = Sh1106<SimpleHalSpiDevice<Spi>, OutputPin>;

/// Reset and initialize the panel
pub fn open_display(settings: &GpioSettings) -> Result<PiDisplay, AppError> {
    let gpio = Gpio::new()?;
    let spi = Spi::new(
        spi_bus(settings.spi_bus)?,
        slave_select(settings.spi_cs)?,
        settings.spi_hz,
        Mode::Mode0,
    )?;

    let dc = gpio.get(settings.dc_pin)?.into_output_high();
    let mut reset = gpio.get(settings.reset_pin)?.into_output_high();
    // RESN stays high once the pin handle is gone
    reset.set_reset_on_drop(false);

    let mut display = Sh1106::new(SimpleHalSpiDevice::new(spi), dc);
    display
        .hard_reset(&mut reset, &mut Delay::new())
        .map_err(AppError::Display)?;
    display.init().map_err(AppError::Display)?;

    info!(
        "SH1106 on SPI{}.{} at {} Hz (A0 GPIO{}, RESN GPIO{})",
        settings.spi_bus, settings.spi_cs, settings.spi_hz, settings.dc_pin, settings.reset_pin
    );
    Ok(display)
}

fn spi_bus(bus: u8) -> Result<Bus, AppError> {
    match bus {
        0 => Ok(Bus::Spi0),
        1 => Ok(Bus::Spi1),
        other => Err(AppError::Wiring(format!("no SPI bus {}", other))),
    }
}

fn slave_select(cs: u8) -> Result<SlaveSelect, AppError> {
    match cs {
        0 => Ok(SlaveSelect::Ss0),
        1 => Ok(SlaveSelect::Ss1),
        2 => Ok(SlaveSelect::Ss2),
        other => Err(AppError::Wiring(format!("no SPI chip select {}", other))),
    }
}

/// Watched button inputs; edges are delivered while this is alive
pub struct ButtonPanel {
    _pins: Vec<InputPin>,
}

/// Start watching the buttons for presses
pub fn watch_buttons(settings: &GpioSettings, debounce: Duration) -> Result<ButtonPanel, AppError> {
    let gpio = Gpio::new()?;
    let router = Arc::new(Mutex::new(InputRouter::new(debounce)));
    let bounce = StdDuration::from_micros(debounce.as_micros());
    let mut pins = Vec::with_capacity(3);

    for (button, pin) in settings.buttons() {
        let mut input = gpio.get(pin)?.into_input_pullup();
        let router = Arc::clone(&router);

        input.set_async_interrupt(Trigger::FallingEdge, Some(bounce), move |_event| {
            let now = Instant::now();
            let sink = InputSink::shared();
            let routed = router
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .route_button(button, now, sink.match_active());
            sink.deliver(routed, now);
        })?;

        info!("Button {} on GPIO{}", button.label(), pin);
        pins.push(input);
    }

    Ok(ButtonPanel { _pins: pins })
}
