use crate::expression::Expression;
use crate::lexer::{self, Token};

/// Parse a token stream into one list holding all top-level forms.
///
/// Parenthesization is not validated. A list that is still open at the end of
/// input is closed there, and a `)` without matching `(` at the top level
/// ends the parse; any tokens after it are dropped.
pub fn parse(input: impl IntoIterator<Item = Token>) -> Expression {
    let mut input = input.into_iter();
    Expression::from_vec(parse_list(&mut input))
}

/// tokenize and parse source text
pub fn read(source: &str) -> Expression {
    parse(lexer::tokenize(source))
}

fn parse_list(input: &mut impl Iterator<Item = Token>) -> Vec<Expression> {
    let mut list = vec![];
    loop {
        match input.next() {
            None | Some(Token::ListClose) => return list,
            Some(Token::ListOpen) => list.push(Expression::from_vec(parse_list(input))),
            Some(Token::Atom(a)) => list.push(a.into()),
        }
    }
}
