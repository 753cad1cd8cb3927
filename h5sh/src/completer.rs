use h5sh::complete::completions;
use h5sh::path::Location;
use h5sh::SharedStore;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock};

/// Verbs whose argument is a group path.
const PATH_COMMANDS: &[&str] = &["cd", "ls"];

pub struct H5shHelper {
    pub store: SharedStore,
    pub cwd: Arc<RwLock<Location>>,
    pub verbs: Vec<&'static str>,
}

impl H5shHelper {
    pub fn new(store: SharedStore, cwd: Arc<RwLock<Location>>, verbs: Vec<&'static str>) -> Self {
        Self { store, cwd, verbs }
    }

    fn complete_verb(&self, word: &str) -> Vec<Pair> {
        self.verbs
            .iter()
            .filter(|verb| !word.is_empty() && verb.starts_with(word))
            .map(|verb| Pair {
                display: (*verb).to_string(),
                replacement: format!("{verb} "),
            })
            .collect()
    }

    fn complete_group(&self, word: &str) -> Vec<Pair> {
        let cwd = self
            .cwd
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        completions(self.store.as_ref(), &cwd, word)
            .into_iter()
            .map(|candidate| {
                let name = candidate
                    .rsplit('/')
                    .next()
                    .unwrap_or(candidate.as_str())
                    .trim_start_matches(['"', '\'']);
                Pair {
                    display: format!("{name}/"),
                    replacement: format!("{candidate}/"),
                }
            })
            .collect()
    }
}

impl Completer for H5shHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let candidates = match split_command(line_to_cursor) {
            (verb_start, verb, None) => (verb_start, self.complete_verb(verb)),
            (_, verb, Some(arg_start)) if PATH_COMMANDS.contains(&verb) => {
                (arg_start, self.complete_group(&line_to_cursor[arg_start..]))
            }
            _ => (pos, Vec::new()),
        };
        Ok(candidates)
    }
}

/// Splits the text before the cursor into the verb (with its offset) and
/// the offset where the argument starts. The argument is everything after
/// the verb, spaces included, as the shell reads it.
fn split_command(line: &str) -> (usize, &str, Option<usize>) {
    let trimmed = line.trim_start();
    let verb_start = line.len() - trimmed.len();
    match trimmed.find(char::is_whitespace) {
        None => (verb_start, trimmed, None),
        Some(end) => {
            let rest = &trimmed[end..];
            let arg_start = line.len() - rest.trim_start().len();
            (verb_start, &trimmed[..end], Some(arg_start))
        }
    }
}

impl Hinter for H5shHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for H5shHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for H5shHelper {}

impl Helper for H5shHelper {}
