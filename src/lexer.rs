use std::iter::Peekable;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    ListOpen,
    ListClose,
    Atom(String),
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        match token {
            Token::ListOpen => "(".to_string(),
            Token::ListClose => ")".to_string(),
            Token::Atom(s) => s,
        }
    }
}

#[derive(Debug)]
pub struct PositionalToken {
    pub start_idx: usize,
    pub end_idx: usize,
    pub token: Token,
}

impl From<PositionalToken> for Token {
    fn from(token: PositionalToken) -> Self {
        token.token
    }
}

type CharI = (usize, char);

/// Splits source text into tokens. Parentheses always stand alone, every
/// other whitespace-delimited run of characters is an atom. There are no
/// strings, escapes or comments, so tokenizing never fails.
pub struct Lexer {
    token_stream: Vec<PositionalToken>,
    list_level: isize,
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Lexer {
            list_level: 0,
            token_stream: vec![],
        }
    }

    /// true unless some `(` is still waiting for its `)`
    pub fn is_balanced(&self) -> bool {
        self.list_level <= 0
    }

    pub fn take(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.token_stream)
            .into_iter()
            .map(PositionalToken::into)
            .collect()
    }

    pub fn take_pos(&mut self) -> Vec<PositionalToken> {
        std::mem::take(&mut self.token_stream)
    }

    pub fn tokenize(&mut self, input: &str) -> &mut Self {
        let mut chars = input.char_indices().peekable();
        while skip_whitespace(&mut chars) {
            let token = self.read_token(&mut chars);
            self.token_stream.extend(token);
        }
        self
    }

    fn read_token(
        &mut self,
        chars: &mut Peekable<impl Iterator<Item = CharI>>,
    ) -> Option<PositionalToken> {
        let &(start_idx, ch) = chars.peek()?;
        let token = match ch {
            '(' => {
                self.list_level += 1;
                Token::ListOpen
            }
            ')' => {
                self.list_level -= 1;
                Token::ListClose
            }
            _ => return read_atom(chars),
        };
        chars.next();
        Some(PositionalToken {
            start_idx,
            end_idx: start_idx + 1,
            token,
        })
    }
}

/// tokenize a complete source text in one go
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new().tokenize(input).take()
}

/// skip whitespace and return true if there is anything left to read
fn skip_whitespace(chars: &mut Peekable<impl Iterator<Item = CharI>>) -> bool {
    loop {
        match chars.peek() {
            Some((_, ch)) if ch.is_whitespace() => {
                chars.next();
            }
            Some(_) => return true,
            None => return false,
        }
    }
}

fn read_atom(chars: &mut Peekable<impl Iterator<Item = CharI>>) -> Option<PositionalToken> {
    let mut buf = String::new();
    let (start_idx, _) = *chars.peek()?;
    let mut end_idx = start_idx;
    while let Some(&(idx, ch)) = chars.peek() {
        if ch.is_whitespace() || is_special_char(ch) {
            break;
        }
        end_idx = idx + ch.len_utf8();
        buf.push(ch);
        chars.next();
    }
    Some(PositionalToken {
        start_idx,
        end_idx,
        token: Token::Atom(buf),
    })
}

fn is_special_char(ch: char) -> bool {
    matches!(ch, '(' | ')')
}
