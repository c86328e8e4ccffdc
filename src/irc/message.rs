//! Outbound commands and inbound lines.
//!
//! [`Command`] is built by the client's command builders and turned into wire
//! text with [`Command::to_wire`]. Its `Display` impl is the log form, which
//! replaces any secret argument with [`REDACTED`].
//!
//! Inbound lines are parsed into [`irc_proto::Message`], re-exported here as
//! [`Message`].

use std::fmt;

pub use irc_proto::Message;

/// Placeholder shown in logs in place of passwords and channel keys.
pub const REDACTED: &str = "[REDACTED]";

/// An outbound protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: &'static str,
    args: Vec<String>,
    trailing: Option<String>,
    secret: Option<usize>,
}

impl Command {
    pub fn new(verb: &'static str) -> Self {
        Self {
            verb,
            args: Vec::new(),
            trailing: None,
            secret: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append an argument that must never appear in log output.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret = Some(self.args.len());
        self.args.push(arg.into());
        self
    }

    pub fn trailing(mut self, text: impl Into<String>) -> Self {
        self.trailing = Some(text.into());
        self
    }

    /// Append the final parameter, using the trailing form only when the
    /// text could not be sent as a middle argument.
    pub fn last_param(self, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() || text.starts_with(':') || text.contains(' ') {
            self.trailing(text)
        } else {
            self.arg(text)
        }
    }

    pub fn verb(&self) -> &'static str {
        self.verb
    }

    /// Wire form without the line terminator.
    pub fn to_wire(&self) -> String {
        let mut out = String::from(self.verb);
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        if let Some(trailing) = &self.trailing {
            out.push_str(" :");
            out.push_str(trailing);
        }
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb)?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.secret == Some(i) {
                write!(f, " {}", REDACTED)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        if let Some(trailing) = &self.trailing {
            write!(f, " :{}", trailing)?;
        }
        Ok(())
    }
}

/// Text after the verb of a raw inbound line, with one leading `:` removed.
/// Tags and prefix are skipped.
pub fn remainder(line: &str) -> &str {
    let mut rest = line.trim_start();
    if rest.starts_with('@') {
        rest = skip_field(rest);
    }
    if rest.starts_with(':') {
        rest = skip_field(rest);
    }
    let rest = skip_field(rest);
    rest.strip_prefix(':').unwrap_or(rest)
}

fn skip_field(s: &str) -> &str {
    match s.find(' ') {
        Some(pos) => s[pos..].trim_start(),
        None => "",
    }
}
