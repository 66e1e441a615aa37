use arboard::Clipboard;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use color_eyre::Result;
use std::io::Write;

/// How a copy ended up on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    System,
    Terminal,
}

pub struct ClipboardService {
    clipboard: Option<Clipboard>,
}

impl ClipboardService {
    pub fn new() -> Self {
        Self {
            clipboard: Clipboard::new().ok(),
        }
    }

    /// Copies through the system clipboard, retrying once with a fresh handle,
    /// then falls back to asking the terminal to do it (OSC 52).
    pub fn copy_text(&mut self, text: &str) -> Result<CopyMethod> {
        match self.copy_system(text) {
            Ok(()) => return Ok(CopyMethod::System),
            Err(error) => {
                tracing::warn!(%error, "system clipboard write failed, retrying");
                self.clipboard = None;
            }
        }
        if self.copy_system(text).is_ok() {
            return Ok(CopyMethod::System);
        }

        tracing::warn!("falling back to terminal clipboard escape");
        let mut stdout = std::io::stdout();
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(CopyMethod::Terminal)
    }

    fn copy_system(&mut self, text: &str) -> Result<()> {
        let clipboard = self.get_clipboard()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }

    fn get_clipboard(&mut self) -> Result<&mut Clipboard> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new()?);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| color_eyre::eyre::eyre!("Clipboard unavailable"))
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::new()
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
        let hindi = osc52_sequence("कहानी");
        assert!(hindi.starts_with("\x1b]52;c;"));
        assert!(hindi.ends_with('\x07'));
    }
}
