//! Display names of expected tokens.

use syntaxis_core::{TokenId, TokenTable};

/// Names tokens in error messages.
pub trait TokenNamer {
    /// Name of `token` when listed among `others` (all expected tokens,
    /// `token` included). `None` falls back to the default name.
    fn name(&self, token: TokenId, others: &[TokenId]) -> Option<String>;
}

/// The token's display name in backticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamer;

impl DefaultNamer {
    pub fn default_name(&self, token: TokenId, tokens: &TokenTable) -> String {
        match tokens.get(token) {
            Some(decl) => format!("`{}`", decl.name),
            None => format!("`#{token}`"),
        }
    }
}

impl TokenNamer for DefaultNamer {
    fn name(&self, _token: TokenId, _others: &[TokenId]) -> Option<String> {
        None
    }
}
