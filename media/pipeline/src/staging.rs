/*!
    Transfer staging.

    Front ends hand the pipeline bytes, not paths: the incoming attachment
    is staged into a temporary input file, the pipeline writes a temporary
    output file, and both are deleted when the staging scope ends, whether
    by normal return, error, or panic.
*/

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;

use tinge_effects::Effect;
use tinge_types::{Error, Result};

use crate::driver::run_file;

/**
    A pair of scoped temporary media artifacts.

    Both files exist for exactly as long as the `Staging` value does;
    dropping it deletes them.
*/
#[derive(Debug)]
pub struct Staging {
    input: NamedTempFile,
    output: NamedTempFile,
}

impl Staging {
    /**
        Allocate staging files with the default `.mp4` extension.
    */
    pub fn new() -> Result<Self> {
        Self::with_extension("mp4")
    }

    /**
        Allocate staging files with the given container extension.

        The extension matters: the sink infers its container format from
        the output path.
    */
    pub fn with_extension(extension: &str) -> Result<Self> {
        let named = |tag: &str| {
            tempfile::Builder::new()
                .prefix(&format!("tinge-{tag}-"))
                .suffix(&format!(".{extension}"))
                .tempfile()
                .map_err(|e| Error::unwritable(format!("staging {tag}: {e}")))
        };
        Ok(Self {
            input: named("in")?,
            output: named("out")?,
        })
    }

    /**
        Path of the staged input artifact.
    */
    pub fn input_path(&self) -> &Path {
        self.input.path()
    }

    /**
        Path of the staged output artifact.
    */
    pub fn output_path(&self) -> &Path {
        self.output.path()
    }

    /**
        Fill the input artifact with the source media bytes.
    */
    pub fn write_input(&self, bytes: &[u8]) -> Result<()> {
        fs::write(self.input.path(), bytes)
            .map_err(|e| Error::unwritable(format!("staging in: {e}")))
    }

    /**
        Read the produced output artifact back as bytes.
    */
    pub fn read_output(&self) -> Result<Vec<u8>> {
        fs::read(self.output.path())
            .map_err(|e| Error::unreadable(format!("staging out: {e}")))
    }
}

/**
    Bytes-in, bytes-out pipeline invocation.

    Stages `media` into a temporary file, runs the pipeline with `effect`,
    and returns the transformed container bytes. The staged files are
    deleted before this returns, on success and on error alike.
*/
pub fn process(media: &[u8], effect: &Effect) -> Result<Vec<u8>> {
    let staging = Staging::new()?;
    staging.write_input(media)?;
    run_file(staging.input_path(), staging.output_path(), effect)?;
    staging.read_output()
}
