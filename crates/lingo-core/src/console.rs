//! Line-based prompt/response over any reader and writer.
//!
//! The session, catalog, viewer and quiz flows only talk to a [`Console`], so
//! tests can script the input with a `Cursor` and inspect the output buffer.

use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line.
    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Print `text` without a newline and read one line of input.
    /// Returns `None` at end of input. The line terminator is stripped.
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Yes/no question. Only "yes" (any case) counts as yes; end of input is no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{} (yes/no): ", question))?;
        Ok(answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("yes")))
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Cursor;

    use super::Console;

    pub type ScriptedConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    /// Console whose input is `lines`, one per line.
    pub fn scripted(lines: &[&str]) -> ScriptedConsole {
        let mut input = lines.join("\n");
        input.push('\n');
        Console::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    pub fn printed(console: &ScriptedConsole) -> String {
        String::from_utf8_lossy(console.output()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{printed, scripted};

    #[test]
    fn prompt_reads_lines_then_none() {
        let mut console = scripted(&["hola", ""]);
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("hola"));
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some(""));
        assert_eq!(console.prompt("> ").unwrap(), None);
        assert_eq!(printed(&console), "> > > ");
    }

    #[test]
    fn prompt_strips_crlf() {
        let mut console = scripted(&["adios\r"]);
        assert_eq!(console.prompt("").unwrap().as_deref(), Some("adios"));
    }

    #[test]
    fn confirm_only_accepts_yes() {
        let mut console = scripted(&["YES", "y", "no"]);
        assert!(console.confirm("Again?").unwrap());
        assert!(!console.confirm("Again?").unwrap());
        assert!(!console.confirm("Again?").unwrap());
        assert!(!console.confirm("Again?").unwrap());
        assert!(printed(&console).starts_with("Again? (yes/no): "));
    }
}
