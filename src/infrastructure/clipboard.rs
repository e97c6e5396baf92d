use crate::domain::error::{AppError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

const NO_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

pub trait ClipboardSink {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Host clipboard reached through the platform's copy command.
pub struct SystemClipboard {
    candidates: Vec<(&'static str, &'static [&'static str])>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![("pbcopy", NO_ARGS)]
        } else if cfg!(target_os = "windows") {
            vec![("clip", NO_ARGS)]
        } else {
            vec![
                ("wl-copy", NO_ARGS),
                ("xclip", XCLIP_ARGS),
                ("xsel", XSEL_ARGS),
            ]
        };
        Self { candidates }
    }

    fn try_command(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        if let Err(e) = written {
            // The child may still be running; reap it before reporting.
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
        Ok(child.wait()?.success())
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        for (program, args) in &self.candidates {
            match Self::try_command(program, args, text) {
                Ok(true) => return Ok(()),
                Ok(false) => tracing::debug!("Clipboard command {} exited with failure", program),
                Err(e) => tracing::debug!("Clipboard command {} unavailable: {}", program, e),
            }
        }
        Err(AppError::ClipboardUnavailable(
            "No working clipboard command found".to_string(),
        ))
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn command_reading_stdin_succeeds() {
        assert!(SystemClipboard::try_command("cat", NO_ARGS, "copied text").unwrap());
    }

    #[test]
    fn write_failure_is_reported_after_child_exits() {
        let text = "x".repeat(4 * 1024 * 1024);
        let err = SystemClipboard::try_command("true", NO_ARGS, &text).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn missing_command_is_an_error() {
        assert!(SystemClipboard::try_command("qa-scribe-no-such-copy-tool", NO_ARGS, "x").is_err());
    }
}
