use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid command line description, {msg}")]
    Syntax { msg: String },

    #[error("invalid condition `{text}`: {msg}")]
    InvalidCondition { text: String, msg: String },

    #[error("option `{spelling}` referenced by a condition not found in command `{command}`")]
    OptionNotFound { spelling: String, command: String },

    #[error("option `{spelling}` listed in `conflicts` not found in command `{command}`")]
    ConflictNotFound { spelling: String, command: String },

    #[error("can't read included file `{}`", path.display())]
    Include {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {msg}")]
    Config { msg: String },
}
