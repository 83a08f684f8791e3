//! Terminal display backend
//!
//! Shows each frame on the terminal using half-block characters, two pixel
//! rows per text row. Frames are shown the way players see the panel, so
//! the mounting rotation does not apply here.

use std::io::Write;

use ngrush_display::{DisplayBackend, DisplayError, Framebuffer, HEIGHT, WIDTH};

/// Display backend that draws frames as text
pub struct TerminalBackend<W> {
    out: W,
    on: bool,
}

impl TerminalBackend<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalBackend<W> {
    pub fn new(out: W) -> Self {
        Self { out, on: true }
    }

    fn draw(&mut self, frame: &Framebuffer) -> std::io::Result<()> {
        let border = "-".repeat(WIDTH);
        let mut text = String::with_capacity((WIDTH + 3) * (HEIGHT / 2 + 2) * 3);

        text.push('+');
        text.push_str(&border);
        text.push_str("+\n");
        for y in (0..HEIGHT).step_by(2) {
            text.push('|');
            for x in 0..WIDTH {
                text.push(match (frame.pixel(x, y), frame.pixel(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            text.push_str("|\n");
        }
        text.push('+');
        text.push_str(&border);
        text.push_str("+\n");

        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> DisplayBackend for TerminalBackend<W> {
    fn flush(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        if !self.on {
            return Ok(());
        }
        self.draw(frame).map_err(|_| DisplayError::Communication)
    }

    fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.on = on;
        Ok(())
    }
}

/// Backend for running without a visible display
pub struct NullBackend;

impl DisplayBackend for NullBackend {
    fn flush(&mut self, _frame: &Framebuffer) -> Result<(), DisplayError> {
        Ok(())
    }

    fn set_display_on(&mut self, _on: bool) -> Result<(), DisplayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_as_half_blocks() {
        let mut frame = Framebuffer::new(false);
        frame.set_pixel(0, 0, true);
        frame.set_pixel(1, 1, true);
        frame.set_pixel(2, 0, true);
        frame.set_pixel(2, 1, true);

        let mut backend = TerminalBackend::new(Vec::new());
        backend.flush(&frame).unwrap();

        let out = String::from_utf8(backend.out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), HEIGHT / 2 + 2);
        assert!(lines[1].starts_with("|▀▄█ "));
        assert_eq!(lines[1].chars().count(), WIDTH + 2);
    }

    #[test]
    fn test_rotation_not_shown() {
        let mut frame = Framebuffer::new(true);
        frame.set_pixel(0, 0, true);

        let mut backend = TerminalBackend::new(Vec::new());
        backend.flush(&frame).unwrap();

        let out = String::from_utf8(backend.out).unwrap();
        assert!(out.lines().nth(1).unwrap().starts_with("|▀"));
    }

    #[test]
    fn test_off_suppresses_output() {
        let mut backend = TerminalBackend::new(Vec::new());
        backend.set_display_on(false).unwrap();
        backend.flush(&Framebuffer::default()).unwrap();
        assert!(backend.out.is_empty());
    }
}
