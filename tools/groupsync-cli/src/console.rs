//! Terminal implementation of the operator console

use dialoguer::Input;
use groupsync_core::{Console, ConsoleError};
use std::io::{BufRead, IsTerminal, Write};

/// Prompts through dialoguer on a TTY, plain stdin lines when piped
pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
        }
    }

    fn read_piped_line(prompt: &str) -> Result<String, ConsoleError> {
        print!("{prompt}: ");
        std::io::stdout().flush().map_err(|e| ConsoleError::Input {
            reason: e.to_string(),
        })?;

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| ConsoleError::Input {
                reason: e.to_string(),
            })?;
        if read == 0 {
            return Err(ConsoleError::Input {
                reason: format!("end of input while waiting for '{prompt}'"),
            });
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn prompt(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        if !self.interactive {
            return Self::read_piped_line(prompt);
        }
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ConsoleError::Input {
                reason: e.to_string(),
            })
    }

    fn println(&mut self, line: &str) {
        println!("{line}");
    }
}
