use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no PDF converter found on PATH")]
    ConverterNotFound,
    #[error("converter exited with status {0:?}")]
    ConverterFailed(Option<i32>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Best-effort document-to-PDF conversion through a headless LibreOffice.
///
/// Conversion is a courtesy output alongside the extraction report; callers
/// treat every failure here as non-fatal.
pub struct PdfConverter {
    program: Option<PathBuf>,
}

impl PdfConverter {
    /// Looks for `soffice` (or the `libreoffice` wrapper) on PATH.
    #[must_use]
    pub fn discover() -> Self {
        let program = which::which("soffice")
            .or_else(|_| which::which("libreoffice"))
            .ok();
        Self { program }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.program.is_some()
    }

    /// Converts `input` to a PDF next to it and returns the output path.
    ///
    /// # Errors
    ///
    /// Fails when no converter binary exists, the process cannot be spawned,
    /// or the converter exits nonzero.
    pub async fn convert(&self, input: &Path) -> ConvertResult<PathBuf> {
        let program = self
            .program
            .as_ref()
            .ok_or(ConvertError::ConverterNotFound)?;
        let out_dir = input.parent().filter(|p| !p.as_os_str().is_empty());
        let out_dir = out_dir.unwrap_or_else(|| Path::new("."));

        let status = Command::new(program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            return Err(ConvertError::ConverterFailed(status.code()));
        }

        let stem = input
            .file_stem()
            .map_or_else(|| OsStr::new("document").to_os_string(), OsStr::to_os_string);
        let mut output = out_dir.join(stem);
        output.set_extension("pdf");
        Ok(output)
    }
}
