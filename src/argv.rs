//! Raw argument list with by-name flag consumption
//!
//! `Argv` owns the token list handed to a resolved command. Flags are
//! pulled out by name (`--flag`, `--no-flag`, `--flag=value`) and
//! removed from the list as they are consumed; whatever is left over is
//! either the command's free-form arguments or, for `--` tokens that
//! matched nothing, grounds for an "unknown option" rejection.

use std::collections::HashMap;

/// Argument tokens remaining for a command invocation.
#[derive(Debug, Clone, Default)]
pub struct Argv {
    entries: Vec<String>,
}

impl Argv {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(args.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First token that is not a flag, without consuming it. Used by
    /// resolution to peek at subcommand names.
    pub fn peek_argument(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|t| !t.starts_with("--"))
            .map(String::as_str)
    }

    /// Consume and return the first non-flag token.
    pub fn shift_argument(&mut self) -> Option<String> {
        let idx = self.entries.iter().position(|t| !t.starts_with("--"))?;
        Some(self.entries.remove(idx))
    }

    /// Consume every `--name` / `--no-name` occurrence. Returns the
    /// value of the last occurrence, or `None` if the flag was absent —
    /// callers must treat `None` as "leave prior state untouched".
    pub fn flag(&mut self, name: &str) -> Option<bool> {
        let on = format!("--{name}");
        let off = format!("--no-{name}");
        let mut result = None;
        self.entries.retain(|t| {
            if *t == on {
                result = Some(true);
                false
            } else if *t == off {
                result = Some(false);
                false
            } else {
                true
            }
        });
        result
    }

    /// Consume every `--name=value` occurrence; the last one wins.
    pub fn option(&mut self, name: &str) -> Option<String> {
        let prefix = format!("--{name}=");
        let mut result = None;
        self.entries.retain(|t| {
            if let Some(value) = t.strip_prefix(&prefix) {
                result = Some(value.to_string());
                false
            } else {
                true
            }
        });
        result
    }

    /// Flag-looking tokens that nothing has consumed.
    pub fn remaining_flags(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|t| t.starts_with("--"))
            .map(String::as_str)
            .collect()
    }

    /// Everything left over, in original order.
    pub fn into_remainder(self) -> Vec<String> {
        self.entries
    }
}

/// Declared option values parsed out of an [`Argv`] for a resolved
/// leaf, keyed by long-flag name.
#[derive(Debug, Default)]
pub struct ParsedOptions {
    switches: HashMap<String, bool>,
    values: HashMap<String, String>,
}

impl ParsedOptions {
    pub fn set_switch(&mut self, name: &str, value: bool) {
        self.switches.insert(name.to_string(), value);
    }

    pub fn set_value(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    /// Explicit value of a boolean switch, `None` when not given.
    pub fn switch(&self, name: &str) -> Option<bool> {
        self.switches.get(name).copied()
    }

    /// Value of a string-valued option, `None` when not given.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
