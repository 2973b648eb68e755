use crate::config::DEFAULT_LINE_CAPACITY;
use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::RefCell;
use std::io::{BufRead, ErrorKind, Read, Result as IoResult, Write};
use std::rc::Rc;

/// Supplier of input lines.
///
/// `Ok(None)` means end of input and ends the REPL. `Ok(Some(line))` is one raw line,
/// possibly empty and possibly still carrying its terminator.
pub trait LineSource {
    /// Show `prompt` and read the next line.
    fn read_line(&mut self, prompt: &str) -> Result<Option<Vec<u8>>, ShellError>;
}

/// Interactive input through a line editor. Nothing is kept in history.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<Vec<u8>>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line.into_bytes())),
            Err(ReadlineError::Eof) => Ok(None),
            // Ctrl-C abandons the line being typed, like an empty line.
            Err(ReadlineError::Interrupted) => Ok(Some(Vec::new())),
            Err(err) => Err(ShellError::Input(err.to_string())),
        }
    }
}

/// Non-interactive input: prompts go to `prompt_out`, lines come from `reader`.
///
/// At most `line_capacity` bytes of a line are kept; the rest of it, up to and
/// including its newline, is consumed and dropped.
pub struct ScriptSource<R> {
    reader: R,
    prompt_out: Box<dyn Write>,
    line_capacity: usize,
}

impl<R: BufRead> ScriptSource<R> {
    pub fn new(reader: R, prompt_out: Box<dyn Write>) -> Self {
        Self {
            reader,
            prompt_out,
            line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }

    pub fn with_line_capacity(mut self, line_capacity: usize) -> Self {
        self.line_capacity = line_capacity;
        self
    }

    fn read_bounded(&mut self) -> IoResult<Option<Vec<u8>>> {
        let limit = u64::try_from(self.line_capacity).unwrap_or(u64::MAX);
        let mut line = Vec::new();
        let read = (&mut self.reader).take(limit).read_until(b'\n', &mut line)?;
        if read == 0 {
            return Ok(None);
        }
        if read == self.line_capacity && line.last() != Some(&b'\n') {
            self.skip_rest_of_line()?;
        }
        Ok(Some(line))
    }

    fn skip_rest_of_line(&mut self) -> IoResult<()> {
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.reader.consume(end + 1);
                    return Ok(());
                }
                None => {
                    let len = available.len();
                    self.reader.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead> LineSource for ScriptSource<R> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<Vec<u8>>, ShellError> {
        let _ = self.prompt_out.write_all(prompt.as_bytes());
        let _ = self.prompt_out.flush();
        self.read_bounded().map_err(|err| ShellError::Input(err.to_string()))
    }
}

/// Memory-backed writer for capturing shell output.
///
/// Clones share the same buffer, so one capture can serve as both the prompt sink
/// and the interpreter's output.
#[derive(Clone, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    /// Public constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}
