//! Renderer trait for prompts and menu screens

/// Errors a renderer can report
///
/// Rendering failures never affect scoring; the engines log them and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Nothing in the request can be drawn (e.g. no mapped glyphs)
    Unrenderable,
    /// The display did not accept the frame
    Device,
}

/// Trait for showing prompts and short text screens
pub trait Renderer {
    /// Show a round's prompt
    fn render_prompt(&mut self, prompt: &str) -> Result<(), RenderError>;

    /// Clear the screen
    fn render_blank(&mut self) -> Result<(), RenderError>;

    /// Show two centered lines (menu pages, game over screen)
    fn render_lines(&mut self, top: &str, bottom: &str) -> Result<(), RenderError>;
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn render_prompt(&mut self, prompt: &str) -> Result<(), RenderError> {
        (**self).render_prompt(prompt)
    }

    fn render_blank(&mut self) -> Result<(), RenderError> {
        (**self).render_blank()
    }

    fn render_lines(&mut self, top: &str, bottom: &str) -> Result<(), RenderError> {
        (**self).render_lines(top, bottom)
    }
}
