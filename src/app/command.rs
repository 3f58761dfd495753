//! The `:` command language.

use std::path::PathBuf;

use thiserror::Error;

/// A parsed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Columns(u16),
    HSplit,
    VSplit,
    WClose,
    Reload,
    Open(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command does not exist")]
    Unknown,
    #[error("Expected 1 argument, got {0}")]
    Arity(usize),
    #[error("Invalid argument")]
    InvalidArgument,
}

impl Command {
    /// Parse whitespace-split prompt tokens. The first token names the
    /// command, by its short or long alias. Commands without arguments
    /// ignore any extra tokens.
    ///
    /// # Errors
    ///
    /// Unknown names, a wrong number of arguments and a column count that is
    /// not a positive integer are rejected.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, CommandError> {
        let Some((name, args)) = tokens.split_first() else {
            return Err(CommandError::Unknown);
        };
        let unary = |args: &[S]| match args {
            [arg] => Ok(arg.as_ref().to_string()),
            _ => Err(CommandError::Arity(args.len())),
        };
        match name.as_ref() {
            "q" | "quit" => Ok(Self::Quit),
            "hs" | "hsplit" => Ok(Self::HSplit),
            "vs" | "vsplit" => Ok(Self::VSplit),
            "wc" | "wclose" => Ok(Self::WClose),
            "rl" | "reload" => Ok(Self::Reload),
            "c" | "columns" => unary(args)?
                .parse::<u16>()
                .ok()
                .filter(|&n| n > 0)
                .map(Self::Columns)
                .ok_or(CommandError::InvalidArgument),
            "o" | "open" => Ok(Self::Open(PathBuf::from(unary(args)?))),
            _ => Err(CommandError::Unknown),
        }
    }

    /// Whether a pending count repeats this command.
    pub const fn repeats(&self) -> bool {
        matches!(self, Self::HSplit | Self::VSplit | Self::WClose)
    }
}
