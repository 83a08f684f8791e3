//! Monochrome page framebuffer
//!
//! 128x64 pixels stored the way SH1106-class controllers expect them: eight
//! pages of 128 column bytes, each byte covering eight rows with the least
//! significant bit at the top. With rotation enabled, drawing coordinates
//! are turned 180 degrees on the way in, so the stored pages are always in
//! panel order.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Display width in pixels
pub const WIDTH: usize = 128;
/// Display height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// One frame in panel page order
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pages: [[u8; WIDTH]; PAGES],
    rotated: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Framebuffer {
    /// Create a blank frame, optionally mounted upside down
    pub const fn new(rotated: bool) -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
            rotated,
        }
    }

    /// Turn every pixel off
    pub fn clear_all(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Column bytes of one page
    pub fn page(&self, index: usize) -> &[u8; WIDTH] {
        &self.pages[index]
    }

    /// Whether no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|page| page.iter().all(|&b| b == 0))
    }

    /// Set a pixel in drawing coordinates; out-of-range pixels are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let (col, row) = self.to_panel(x as usize, y as usize);
        let mask = 1u8 << (row % 8);
        let byte = &mut self.pages[row / 8][col];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Read a pixel in drawing coordinates
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        let (col, row) = self.to_panel(x, y);
        self.pages[row / 8][col] & (1 << (row % 8)) != 0
    }

    fn to_panel(&self, x: usize, y: usize) -> (usize, usize) {
        if self.rotated {
            (WIDTH - 1 - x, HEIGHT - 1 - y)
        } else {
            (x, y)
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

/// Draw target that blows every pixel up to a `factor` x `factor` block
///
/// Lets the small built-in fonts fill the screen for short prompts.
pub struct Scaled<'a, T> {
    target: &'a mut T,
    factor: u32,
}

impl<'a, T> Scaled<'a, T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: &'a mut T, factor: u32) -> Self {
        Self {
            target,
            factor: factor.max(1),
        }
    }
}

impl<T> OriginDimensions for Scaled<'_, T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    fn size(&self) -> Size {
        let size = self.target.bounding_box().size;
        Size::new(size.width / self.factor, size.height / self.factor)
    }
}

impl<T> DrawTarget for Scaled<'_, T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    type Color = BinaryColor;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let factor = self.factor as i32;
        let block = Size::new(self.factor, self.factor);
        for Pixel(point, color) in pixels {
            let origin = Point::new(point.x * factor, point.y * factor);
            self.target.fill_solid(&Rectangle::new(origin, block), color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_is_top_row() {
        let mut fb = Framebuffer::new(false);
        fb.set_pixel(3, 0, true);
        fb.set_pixel(3, 7, true);
        fb.set_pixel(5, 8, true);

        assert_eq!(fb.page(0)[3], 0b1000_0001);
        assert_eq!(fb.page(1)[5], 0b0000_0001);
        assert!(fb.pixel(3, 7));
        assert!(!fb.pixel(3, 6));
    }

    #[test]
    fn test_rotation_maps_to_opposite_corner() {
        let mut fb = Framebuffer::new(true);
        fb.set_pixel(0, 0, true);

        assert!(fb.pixel(0, 0));
        assert!(!fb.pixel(WIDTH - 1, HEIGHT - 1));
        assert_eq!(fb.page(PAGES - 1)[WIDTH - 1], 0b1000_0000);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut fb = Framebuffer::default();
        fb.set_pixel(-1, 0, true);
        fb.set_pixel(WIDTH as i32, 0, true);
        fb.set_pixel(0, HEIGHT as i32, true);
        assert!(fb.is_blank());
    }

    #[test]
    fn test_draw_target_and_clear() {
        let mut fb = Framebuffer::default();
        Rectangle::new(Point::new(0, 0), Size::new(2, 9))
            .into_styled(embedded_graphics::primitives::PrimitiveStyle::with_fill(
                BinaryColor::On,
            ))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.page(0)[0], 0xFF);
        assert_eq!(fb.page(1)[1], 0x01);
        assert_eq!(fb.page(0)[2], 0x00);

        fb.clear_all();
        assert!(fb.is_blank());
    }

    #[test]
    fn test_scaled_target() {
        let mut fb = Framebuffer::default();
        {
            let mut scaled = Scaled::new(&mut fb, 4);
            assert_eq!(scaled.size(), Size::new(32, 16));
            Pixel(Point::new(1, 1), BinaryColor::On)
                .draw(&mut scaled)
                .unwrap();
        }

        for x in 4..8 {
            for y in 4..8 {
                assert!(fb.pixel(x, y));
            }
        }
        assert!(!fb.pixel(3, 4));
        assert!(!fb.pixel(8, 4));
    }
}
