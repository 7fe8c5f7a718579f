//! Lexer construction errors.

use syntaxis_core::TokenRole;

/// Errors raised while building a `Lexer`.
///
/// Lexing itself never fails: unrecognized input becomes error tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("token `{token}`: invalid pattern `{pattern}`: {message}")]
    Pattern {
        token: String,
        pattern: String,
        message: String,
    },

    #[error("invalid comment pattern `{pattern}`: {message}")]
    CommentPattern { pattern: String, message: String },

    #[error("token table declares no {0} token")]
    MissingRole(TokenRole),

    #[error("tab width must be at least 1")]
    ZeroTabWidth,
}

pub type Result<T> = std::result::Result<T, LexerError>;
