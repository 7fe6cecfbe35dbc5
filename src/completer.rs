use crate::environment::EnvWeak;
use crate::lexer::{Lexer, Token};
use rustyline::{
    self, completion::Completer, highlight::Highlighter, hint::Hinter, validate::Validator,
    Context, Helper,
};

/// Completes names bound in the interpreter's environment.
pub struct EnvHelper(EnvWeak);

impl EnvHelper {
    pub fn new(env: EnvWeak) -> Self {
        EnvHelper(env)
    }

    /// start position of the name under the cursor and the names it may
    /// complete to
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let env = match self.0.upgrade() {
            Some(env) => env,
            None => return (0, vec![]),
        };

        let tokens = Lexer::new().tokenize(line).take_pos();

        let token = match tokens
            .iter()
            .find(|&pt| pt.start_idx <= pos && pt.end_idx == pos)
        {
            Some(t) => t,
            None => return (0, vec![]),
        };

        let prefix = match &token.token {
            Token::Atom(s) => &s[..pos - token.start_idx],
            _ => return (0, vec![]),
        };

        let mut candidates: Vec<String> = env
            .borrow()
            .all_keys()
            .into_iter()
            .filter(|key| key.name().starts_with(prefix))
            .map(|key| key.name().to_string())
            .collect();
        candidates.sort();
        candidates.dedup();

        (token.start_idx, candidates)
    }
}

impl Helper for EnvHelper {}

impl Hinter for EnvHelper {
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context) -> Option<String> {
        None
    }
}

impl Completer for EnvHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Highlighter for EnvHelper {}

impl Validator for EnvHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::default_env;
    use crate::expression::Expression;

    #[test]
    fn completes_bound_and_builtin_names() {
        let env = default_env();
        env.define("display-all", Expression::nil());
        let helper = EnvHelper::new(env.downgrade());

        let (start, names) = helper.candidates("(disp", 5);
        assert_eq!(start, 1);
        assert_eq!(names, vec!["display".to_string(), "display-all".to_string()]);
    }

    #[test]
    fn nothing_outside_an_atom() {
        let env = default_env();
        let helper = EnvHelper::new(env.downgrade());
        assert_eq!(helper.candidates("(foo ", 5), (0, vec![]));
    }

    #[test]
    fn nothing_once_environment_is_gone() {
        let helper = EnvHelper::new(default_env().downgrade());
        assert_eq!(helper.candidates("di", 2), (0, vec![]));
    }
}
