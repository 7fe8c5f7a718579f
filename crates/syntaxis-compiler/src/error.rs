//! Grammar compilation errors.

use syntaxis_core::TokenId;

/// Errors detected while compiling a grammar declaration. All are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("parameter `{param}` of `{rule}`: no rule produces `{kind}`")]
    UnknownKind {
        rule: String,
        param: String,
        kind: String,
    },

    #[error("parameter `{param}` of `{rule}`: unknown token #{token}")]
    UnknownToken {
        rule: String,
        param: String,
        token: TokenId,
    },

    #[error("parameter `{param}` of `{rule}`: terminal accepts no token")]
    EmptyTerminal { rule: String, param: String },

    #[error("parameter `{param}` of `{rule}`: no rule produces `{kind}` at rank {max_rank} or lower")]
    EmptyAlternatives {
        rule: String,
        param: String,
        kind: String,
        max_rank: u32,
    },

    #[error("`{rule}` has {count} optional parameters, at most {max} are allowed")]
    TooManyOptionals {
        rule: String,
        count: usize,
        max: usize,
    },

    #[error("no rule produces start kind `{kind}`")]
    UnknownStartKind { kind: String },

    #[error("token table declares no end-of-stream token")]
    MissingEndOfStream,
}

pub type Result<T> = std::result::Result<T, CompileError>;
