//! Rendering of page elements into HTML and JavaScript.

pub mod error;
pub mod output;
pub mod view;

use crate::render::error::RenderError;

/// A sink for rendered markup.
pub trait OutputStream {
    /// Appends `data` to the output.
    fn write(&mut self, data: &str) -> Result<(), RenderError>;
}

/// An element that can be rendered into an [OutputStream].
pub trait Render {
    /// Writes the element markup to `output`.
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream;
}

impl OutputStream for String {
    fn write(&mut self, data: &str) -> Result<(), RenderError> {
        self.push_str(data);
        Ok(())
    }
}
