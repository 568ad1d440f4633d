//! Environment binder: maps external key names to option setters.

use std::collections::HashMap;

use crate::error::Result;

type Setter<'a> = Box<dyn Fn(&str) -> Result<()> + Send + Sync + 'a>;

/// Maps external key names to textual option setters.
///
/// Keys are bound to closures that call an option's `set`; applying a batch
/// of `KEY` / `KEY=VALUE` tokens dispatches each recognized key's value to
/// its setter. Unrecognized keys are silently ignored, since a binder
/// typically sees the whole process environment, most of which is not for
/// it.
///
/// ```rust
/// use tunables::kinds::{Bool, Number};
/// use tunables::sources::Env;
///
/// let verbose = Bool::new(false);
/// let port = Number::bounded(8080u16, 1024, 65535);
///
/// let env = Env::new()
///     .bind("VERBOSE", |s| verbose.set(s))
///     .bind("PORT", |s| port.set(s));
///
/// // A bare key carries an empty value: flag shorthand for booleans.
/// env.apply(["VERBOSE", "PORT=9090", "UNRELATED=1"]).unwrap();
/// assert!(verbose.value());
/// assert_eq!(port.value(), 9090);
/// ```
#[derive(Default)]
pub struct Env<'a> {
    setters: HashMap<String, Setter<'a>>,
}

impl<'a> Env<'a> {
    /// Create an empty binder.
    pub fn new() -> Self {
        Self {
            setters: HashMap::new(),
        }
    }

    /// Associate `key` with a textual setter.
    pub fn bind<F>(mut self, key: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'a,
    {
        self.setters.insert(key.into(), Box::new(setter));
        self
    }

    /// Apply `KEY` / `KEY=VALUE` tokens in order.
    ///
    /// Each token is split at its first `=`; a bare `KEY` carries an empty
    /// value and a leading `=` leaves the token unsplit (so it cannot match
    /// a bound key). Empty tokens are skipped. The first setter error aborts
    /// the batch and is returned verbatim; updates applied before the
    /// failing key remain in effect.
    pub fn apply<I>(&self, tokens: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            let (key, value) = match token.find('=') {
                Some(eq) if eq > 0 => (&token[..eq], &token[eq + 1..]),
                _ => (token, ""),
            };
            if let Some(set) = self.setters.get(key) {
                set(value)?;
            }
        }
        Ok(())
    }

    /// Apply the full process environment.
    pub fn apply_os(&self) -> Result<()> {
        self.apply(std::env::vars().map(|(key, value)| format!("{key}={value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{Bool, Number, Text};

    #[test]
    fn bare_key_and_key_value_both_apply() {
        let flag = Bool::new(false);
        let count = Number::new(0i32);

        let env = Env::new()
            .bind("BOOL", |s| flag.set(s))
            .bind("INT", |s| count.set(s));

        env.apply(["BOOL", "INT=321", "FOO=1"]).unwrap();
        assert!(flag.value());
        assert_eq!(count.value(), 321);
    }

    #[test]
    fn unknown_and_empty_keys_are_ignored() {
        let count = Number::new(7u8);
        let env = Env::new().bind("N", |s| count.set(s));
        env.apply(["", "=weird", "OTHER=9"]).unwrap();
        assert_eq!(count.value(), 7);
    }

    #[test]
    fn first_error_aborts_but_keeps_prior_updates() {
        let first = Number::bounded(1i32, 0, 10);
        let second = Number::bounded(1i32, 0, 10);
        let third = Number::bounded(1i32, 0, 10);

        let env = Env::new()
            .bind("A", |s| first.set(s))
            .bind("B", |s| second.set(s))
            .bind("C", |s| third.set(s));

        let err = env.apply(["A=5", "B=99", "C=5"]).unwrap_err();
        assert_eq!(err.to_string(), "99 > max{10}");
        assert_eq!(first.value(), 5);
        assert_eq!(second.value(), 1);
        assert_eq!(third.value(), 1);
    }

    #[test]
    fn values_may_contain_equals() {
        let opt = Text::new("");
        let env = Env::new().bind("EXPR", |s| opt.set(s));
        env.apply(["EXPR=a=b=c"]).unwrap();
        assert_eq!(opt.value(), "a=b=c");
    }
}
