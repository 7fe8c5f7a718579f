//! Binary serialization for compiled grammars using postcard.

use super::Grammar;

/// Failure to encode or decode a grammar blob.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("binary encode error: {0}")]
    Encode(#[source] postcard::Error),

    #[error("binary decode error: {0}")]
    Decode(#[source] postcard::Error),

    #[error("grammar blob is inconsistent: {0}")]
    Inconsistent(String),
}

impl Grammar {
    /// Deserialize a grammar from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        let mut grammar: Grammar = postcard::from_bytes(bytes).map_err(GrammarError::Decode)?;
        grammar.kinds.reindex();
        grammar.check_consistency()?;
        Ok(grammar)
    }

    /// Serialize the grammar to binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, GrammarError> {
        postcard::to_allocvec(self).map_err(GrammarError::Encode)
    }

    fn check_consistency(&self) -> Result<(), GrammarError> {
        let first = self.token_count() as u32;
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.id() != first + index as u32 {
                return Err(GrammarError::Inconsistent(format!(
                    "rule at index {index} has id {}",
                    rule.id()
                )));
            }
            let dangling = rule
                .steps()
                .iter()
                .flat_map(|s| s.sources())
                .find(|&&id| id as usize >= self.entity_count());
            if let Some(id) = dangling {
                return Err(GrammarError::Inconsistent(format!(
                    "rule {} refers to unknown entity {id}",
                    rule.id()
                )));
            }
        }
        if !self.tokens.contains(self.end_of_stream) {
            return Err(GrammarError::Inconsistent(format!(
                "end-of-stream token {} is out of range",
                self.end_of_stream
            )));
        }
        Ok(())
    }
}
