#![warn(clippy::pedantic)]
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use ed::{Editor, Terminal};

#[derive(Parser, Debug)]
#[command(
    about = "Line-oriented text editor",
    override_usage = "ed file",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// File to load into the buffer
    #[arg(allow_hyphen_values = true)]
    file: PathBuf,
}

impl Args {
    /// Option letters given where the file name should be, e.g. `-s`.
    /// A lone `-` is a file name.
    fn illegal_option(&self) -> Option<String> {
        let name = self.file.to_string_lossy();
        match name.strip_prefix('-') {
            Some(rest) if !rest.is_empty() => Some(rest.to_owned()),
            _ => None,
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();
    if let Some(option) = args.illegal_option() {
        Args::command()
            .error(
                clap::error::ErrorKind::UnknownArgument,
                format!("illegal option -- {option}"),
            )
            .exit();
    }

    let mut editor = Editor::from_file_path(&args.file, Terminal::stdio())
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    editor.run()?;

    if editor.errors().is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
