// Console seam between the menu/directory flows and the terminal.
// The interactive implementation uses `dialoguer`; when stdin is not a
// terminal (piped or scripted input) it falls back to plain line reads so
// end of input is observable and no prompt loop can spin forever.

use dialoguer::Input;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Blocking line-oriented console.
pub trait Console {
    /// Show `prompt` and read one line without its trailing newline.
    /// Returns `Ok(None)` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print one line of output.
    fn print(&mut self, line: &str) -> io::Result<()>;
}

/// Console bound to the process stdin/stdout.
#[derive(Debug)]
pub struct TermConsole {
    interactive: bool,
}

impl TermConsole {
    pub fn new() -> Self {
        TermConsole {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.interactive {
            // `Input` renders the prompt itself and allows editing the line.
            let line: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .report(false)
                .interact_text()?;
            return Ok(Some(line));
        }

        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}: ")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn print(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{line}")
    }
}

/// Console that replays canned input and captures everything written.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            input: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines printed so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Whether `needle` occurs in any printed line.
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|l| l.contains(needle))
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn print(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}
