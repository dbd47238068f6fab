use dialoguer::Password;
use std::io::{ self, IsTerminal, Write };
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin };

/// Line-oriented input for the terminal views. Generic so the views can be
/// driven from an in-memory script.
pub struct LineReader<R> {
    lines: Lines<R>,
    interactive: bool,
}

impl LineReader<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        let mut reader = Self::new(BufReader::new(tokio::io::stdin()));
        reader.interactive = io::stdin().is_terminal();
        reader
    }
}

impl<R> LineReader<R> where R: AsyncBufRead + Unpin {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), interactive: false }
    }

    /// Next line without its terminator, or `None` once input is closed.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{}: ", label);
        io::stdout().flush()?;
        self.next_line().await
    }

    /// Like [`LineReader::prompt`], but a terminal does not echo what is typed.
    pub async fn prompt_secret(&mut self, label: &str) -> io::Result<Option<String>> {
        if !self.interactive {
            return self.prompt(label).await;
        }
        let label = label.to_string();
        let ask = move || Password::new().with_prompt(label).allow_empty_password(true).interact();
        let secret = tokio::task::spawn_blocking(ask).await.map_err(io::Error::other)?;
        secret.map(Some).map_err(|e| io::Error::other(e.to_string()))
    }
}
