use crate::completer::EnvHelper;
use crate::environment::EnvRef;
use crate::errors::Result;
use crate::lexer::Lexer;
use rustyline::Editor;

pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read lines until all opened parentheses are closed.
    fn read_balanced(&mut self) -> Result<String> {
        let mut source = self.read_line(">> ")?;
        while !Lexer::new().tokenize(&source).is_balanced() {
            source.push_str(&self.read_line(".. ")?);
        }
        Ok(source)
    }
}

pub struct ReplInput {
    rl: Editor<EnvHelper>,
}

impl ReplInput {
    pub fn new(env: &EnvRef) -> Self {
        let mut rl = Editor::new();
        rl.set_helper(Some(EnvHelper::new(env.downgrade())));
        ReplInput { rl }
    }
}

impl LineReader for ReplInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let line = self.rl.readline(prompt)?;
        self.rl.add_history_entry(line.as_str());
        Ok(line + "\n")
    }
}
