//! Parsing of `Environment=` values.
//!
//! The value is a whitespace separated list of `NAME=VALUE` assignments.
//! Double quotes group a token that contains spaces; they may wrap either
//! the value (`A="x y"`) or the whole assignment (`"A=x y"`).

use log::debug;

use crate::error::EnvironmentError;

/// Variables in the order they were first assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMap {
    vars: Vec<(String, String)>,
}

impl EnvironmentMap {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// A reassigned variable keeps its position and takes the new value.
    fn set(&mut self, name: String, value: String) {
        match self.vars.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name, value)),
        }
    }
}

/// Parse an `Environment=` value.
///
/// Only double quotes are special. Backslashes, single quotes and `#` are
/// ordinary characters and end up in the value as written.
pub fn parse_environment(raw: &str) -> Result<EnvironmentMap, EnvironmentError> {
    let tokens = split_tokens(raw).ok_or_else(|| EnvironmentError::UnbalancedQuotes {
        raw: raw.to_owned(),
    })?;
    debug!("environment tokens: {tokens:?}");

    let mut env = EnvironmentMap::default();
    for token in tokens {
        let assignment = unquote(&token);
        let Some((name, value)) = assignment.split_once('=') else {
            return Err(EnvironmentError::MissingEquals { token });
        };
        env.set(name.to_owned(), value.trim_matches('"').to_owned());
    }

    Ok(env)
}

/// Split on whitespace outside of double quotes. Quotes stay in the tokens.
/// `None` if a quote is left open.
fn split_tokens(raw: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for ch in raw.chars() {
        if ch == '"' {
            in_quote = !in_quote;
            current.push(ch);
        } else if ch.is_whitespace() && !in_quote {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if in_quote {
        return None;
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Some(tokens)
}

/// Drop one pair of quotes wrapping the whole assignment (`"A=x y"`).
fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}
