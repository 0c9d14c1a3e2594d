//! File output for rendered pages.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::render::OutputStream;
use crate::render::error::RenderError;

/// An [OutputStream] writing to a file.
pub struct OutputFile {
    file: File,
}

impl OutputFile {
    /// Creates, or truncates, the file at `path`.
    pub fn new(path: &Path) -> Result<OutputFile, RenderError> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Flushes the written data to disk.
    pub fn flush(&mut self) -> Result<(), RenderError> {
        self.file.flush()?;
        Ok(())
    }
}

impl OutputStream for OutputFile {
    fn write(&mut self, data: &str) -> Result<(), RenderError> {
        self.file.write_all(data.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn writes_data_to_the_file() -> Result<(), RenderError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("index.html");

        let mut output = OutputFile::new(&path)?;
        output.write("<html>")?;
        output.write("</html>")?;
        output.flush()?;

        assert_eq!(fs::read_to_string(&path)?, "<html></html>");

        Ok(())
    }
}
