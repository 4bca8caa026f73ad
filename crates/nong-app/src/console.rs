use std::io::{self, BufRead, Write};

pub const RULE: &str = "============================================================";

/// Line-oriented terminal. End of input surfaces as `UnexpectedEof`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` without a newline and read one line, trimmed
    pub fn prompt(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// `y`/`Y` is yes, anything else is no
    pub fn confirm(&mut self, message: &str) -> io::Result<bool> {
        Ok(self.prompt(message)?.eq_ignore_ascii_case("y"))
    }

    pub fn pause(&mut self) -> io::Result<()> {
        self.prompt("\n📌 Press Enter to continue...")?;
        Ok(())
    }

    pub fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output, "\n{RULE}\n{title}\n{RULE}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

pub fn is_eof(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}
