//! Copies output to the system clipboard through whichever platform tool is
//! installed.

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardProvider {
    Tmux,
    Xclip,
    Xsel,
    Wayland,
    MacOS,
    Windows,
    Termux,
}
impl ClipboardProvider {
    fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }
}

/// Copies `text` using the first available provider.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let provider = detect_providers()
        .into_iter()
        .next()
        .ok_or(ClipboardError::NoClipboardFound)?;
    let (cmd, args) = provider.command();
    debug!("Copying {} bytes to the clipboard with {}", text.len(), cmd);
    pipe_into(cmd, args, text)
}

fn pipe_into(cmd: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;
    {
        let stdin = child.stdin.as_mut().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

fn detect_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::new();
    if env::var_os("TMUX").is_some() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }
    if cfg!(target_os = "macos") {
        providers.push(ClipboardProvider::MacOS);
    } else if cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some() {
        providers.push(ClipboardProvider::Windows);
    } else if cfg!(target_os = "android") {
        providers.push(ClipboardProvider::Termux);
    } else {
        let candidates = [
            ClipboardProvider::Wayland,
            ClipboardProvider::Xsel,
            ClipboardProvider::Xclip,
        ];
        providers.extend(
            candidates
                .into_iter()
                .filter(|p| command_exists(p.command().0)),
        );
    }
    providers
}

/// Whether `command` is an executable on `PATH`.
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}
