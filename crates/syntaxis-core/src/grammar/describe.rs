//! Human-readable rule listing.
//!
//! ```text
//! [7] Sum : Expr -> Expr[8] <PLUS> {Num[9] Paren[10]}
//! [11] Stmt* -> Stmt[5] <SEMI>
//! ```

use super::Grammar;
use super::types::RuleId;

impl Grammar {
    /// One line describing a rule.
    ///
    /// # Panics
    /// Panics if `id` is not a rule of this grammar.
    pub fn describe_rule(&self, id: RuleId) -> String {
        let rule = self.rule(id);
        let kind = self.kinds().resolve(rule.kind());

        let mut out = match rule.action() {
            Some(action) => format!("[{id}] {action} : {kind} ->"),
            None => format!("[{id}] {kind}* ->"),
        };

        for step in rule.steps() {
            out.push(' ');
            let sources = step.sources();
            if step.is_terminal() {
                let names: Vec<_> = sources.iter().map(|&t| self.entity_label(t)).collect();
                out.push_str(&format!("<{}>", names.join(" ")));
                continue;
            }

            let labels: Vec<_> = sources
                .iter()
                .map(|&r| format!("{}[{r}]", self.entity_label(r)))
                .collect();
            if labels.len() == 1 {
                out.push_str(&labels[0]);
            } else {
                out.push_str(&format!("{{{}}}", labels.join(" ")));
            }
        }

        out
    }

    /// Every rule, one per line, in id order.
    pub fn describe(&self) -> String {
        let first = self.token_count() as RuleId;
        let mut out = String::new();
        for index in 0..self.rules().len() {
            out.push_str(&self.describe_rule(first + index as RuleId));
            out.push('\n');
        }
        out
    }
}
