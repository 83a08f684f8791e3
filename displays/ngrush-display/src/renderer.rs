//! Prompt and menu rendering
//!
//! Prompts are drawn upper-case, centered and scaled up as far as the
//! screen allows. Only the letters A-Z are drawn; anything else in a prompt
//! is skipped. Menu and result screens use two centered lines of text.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_7X13_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;
use tracing::debug;

use ngrush_core::config::MAX_PROMPT_LEN;
use ngrush_core::traits::{RenderError, Renderer};

use crate::backend::{DisplayBackend, DisplayError};
use crate::framebuffer::{Framebuffer, Scaled, HEIGHT, WIDTH};

/// Font for prompts (before scaling)
const PROMPT_FONT: &MonoFont<'static> = &FONT_10X20;
/// Largest prompt scale factor
const MAX_SCALE: u32 = 3;
/// Top line of a two-line screen
const TOP_FONT: &MonoFont<'static> = &FONT_7X13_BOLD;
const TOP_Y: i32 = 10;
/// Bottom line of a two-line screen
const BOTTOM_FONT: &MonoFont<'static> = &FONT_6X10;
const BOTTOM_Y: i32 = 35;

impl From<DisplayError> for RenderError {
    fn from(_: DisplayError) -> Self {
        RenderError::Device
    }
}

/// The game's renderer on top of a display backend
pub struct OledRenderer<B> {
    backend: B,
    frame: Framebuffer,
}

impl<B: DisplayBackend> OledRenderer<B> {
    pub fn new(backend: B, rotated: bool) -> Self {
        Self {
            backend,
            frame: Framebuffer::new(rotated),
        }
    }

    /// Last frame drawn
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Blank the panel and switch it off
    pub fn power_off(&mut self) -> Result<(), DisplayError> {
        self.frame.clear_all();
        self.backend.flush(&self.frame)?;
        self.backend.set_display_on(false)
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.backend.flush(&self.frame)?;
        Ok(())
    }
}

/// Upper-case letters of `prompt` that the display can draw
fn drawable_letters(prompt: &str) -> String<MAX_PROMPT_LEN> {
    let mut out = String::new();
    for c in prompt.chars().filter(char::is_ascii_alphabetic) {
        if out.push(c.to_ascii_uppercase()).is_err() {
            break;
        }
    }
    out
}

/// Largest factor at which `chars` glyphs of `font` fit on screen
fn scale_for(font: &MonoFont<'_>, chars: usize) -> u32 {
    let width = font.character_size.width * chars as u32;
    let height = font.character_size.height;
    let fit_x = WIDTH as u32 / width.max(1);
    let fit_y = HEIGHT as u32 / height.max(1);
    fit_x.min(fit_y).clamp(1, MAX_SCALE)
}

fn centered_line(
    frame: &mut Framebuffer,
    text: &str,
    font: &MonoFont<'_>,
    y: i32,
) {
    let style = MonoTextStyle::new(font, BinaryColor::On);
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    let _ = Text::with_text_style(text, Point::new(WIDTH as i32 / 2, y), style, layout)
        .draw(frame);
}

impl<B: DisplayBackend> Renderer for OledRenderer<B> {
    fn render_prompt(&mut self, prompt: &str) -> Result<(), RenderError> {
        let letters = drawable_letters(prompt);
        if letters.is_empty() {
            return Err(RenderError::Unrenderable);
        }

        let scale = scale_for(PROMPT_FONT, letters.len());
        let glyph = PROMPT_FONT.character_size;
        let text_width = glyph.width * letters.len() as u32;

        // Position in scaled coordinates
        let x = (WIDTH as u32 / scale).saturating_sub(text_width) / 2;
        let y = (HEIGHT as u32 / scale).saturating_sub(glyph.height) / 2;

        self.frame.clear_all();
        let style = MonoTextStyle::new(PROMPT_FONT, BinaryColor::On);
        let mut scaled = Scaled::new(&mut self.frame, scale);
        let _ = Text::with_baseline(
            &letters,
            Point::new(x as i32, y as i32),
            style,
            Baseline::Top,
        )
        .draw(&mut scaled);

        debug!("Prompt {} drawn at scale {}", letters.as_str(), scale);
        self.present()
    }

    fn render_blank(&mut self) -> Result<(), RenderError> {
        self.frame.clear_all();
        self.present()
    }

    fn render_lines(&mut self, top: &str, bottom: &str) -> Result<(), RenderError> {
        self.frame.clear_all();
        centered_line(&mut self.frame, top, TOP_FONT, TOP_Y);
        if !bottom.is_empty() {
            centered_line(&mut self.frame, bottom, BOTTOM_FONT, BOTTOM_Y);
        }
        self.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps a copy of every flushed frame
    #[derive(Default)]
    struct CaptureBackend {
        frames: std::vec::Vec<Framebuffer>,
        on: Option<bool>,
        fail: bool,
    }

    impl DisplayBackend for CaptureBackend {
        fn flush(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.frames.push(frame.clone());
            Ok(())
        }

        fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
            self.on = Some(on);
            Ok(())
        }
    }

    fn lit_columns(frame: &Framebuffer) -> (usize, usize) {
        let cols: std::vec::Vec<usize> = (0..WIDTH)
            .filter(|&x| (0..HEIGHT).any(|y| frame.pixel(x, y)))
            .collect();
        (cols[0], cols[cols.len() - 1])
    }

    #[test]
    fn test_drawable_letters() {
        assert_eq!(drawable_letters("th").as_str(), "TH");
        assert_eq!(drawable_letters("a-b'c").as_str(), "ABC");
        assert!(drawable_letters("12 ?").is_empty());
    }

    #[test]
    fn test_scale_shrinks_with_length() {
        assert_eq!(scale_for(PROMPT_FONT, 2), 3);
        assert_eq!(scale_for(PROMPT_FONT, 3), 3);
        assert_eq!(scale_for(PROMPT_FONT, 5), 2);
        assert_eq!(scale_for(PROMPT_FONT, 8), 1);
    }

    #[test]
    fn test_prompt_is_centered() {
        let mut renderer = OledRenderer::new(CaptureBackend::default(), false);
        renderer.render_prompt("th").unwrap();

        let frame = renderer.backend().frames.last().unwrap();
        assert!(!frame.is_blank());

        let (left, right) = lit_columns(frame);
        let left_margin = left as i32;
        let right_margin = (WIDTH - 1 - right) as i32;
        assert!((left_margin - right_margin).abs() <= 12);
    }

    #[test]
    fn test_unrenderable_prompt() {
        let mut renderer = OledRenderer::new(CaptureBackend::default(), false);
        assert_eq!(renderer.render_prompt("42"), Err(RenderError::Unrenderable));
        assert!(renderer.backend().frames.is_empty());
    }

    #[test]
    fn test_blank_after_prompt() {
        let mut renderer = OledRenderer::new(CaptureBackend::default(), true);
        renderer.render_prompt("and").unwrap();
        renderer.render_blank().unwrap();
        assert!(renderer.frame().is_blank());
        assert_eq!(renderer.backend().frames.len(), 2);
    }

    #[test]
    fn test_lines_use_both_halves() {
        let mut renderer = OledRenderer::new(CaptureBackend::default(), false);
        renderer.render_lines("Players", "4").unwrap();

        let frame = renderer.frame();
        let top = (0..WIDTH).any(|x| (TOP_Y as usize..BOTTOM_Y as usize).any(|y| frame.pixel(x, y)));
        let bottom = (0..WIDTH).any(|x| (BOTTOM_Y as usize..HEIGHT).any(|y| frame.pixel(x, y)));
        assert!(top);
        assert!(bottom);
    }

    #[test]
    fn test_device_failure_maps_to_render_error() {
        let backend = CaptureBackend {
            fail: true,
            ..Default::default()
        };
        let mut renderer = OledRenderer::new(backend, false);
        assert_eq!(renderer.render_blank(), Err(RenderError::Device));
    }

    #[test]
    fn test_power_off() {
        let mut renderer = OledRenderer::new(CaptureBackend::default(), false);
        renderer.render_lines("Game Over", "").unwrap();
        renderer.power_off().unwrap();
        assert_eq!(renderer.backend().on, Some(false));
        assert!(renderer.backend().frames.last().unwrap().is_blank());
    }
}
