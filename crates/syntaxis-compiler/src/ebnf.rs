//! EBNF rendering of a grammar declaration.
//!
//! Documentation output only. Tokens recognized by a pattern or by several
//! literals get a production of their own, listed first in token order.
//! Kinds follow in the order their first rule was declared, one
//! alternative per rule, ranks ignored.
//!
//! ```text
//! 'number' ::=
//!   | /[0-9]+/
//!
//! Expr ::=
//!   | Expr ('+' | '-') Expr
//!   | 'number'
//! ```

use indexmap::IndexMap;
use syntaxis_core::{Recognizer, TokenId, TokenTable};

use crate::declare::{GrammarDecl, ListDelimiter, ParamShape};

/// Render `decl` as EBNF text.
pub fn render(decl: &GrammarDecl, tokens: &TokenTable) -> String {
    let mut productions: IndexMap<String, Vec<String>> = IndexMap::new();

    let names: Vec<String> = tokens
        .iter()
        .map(|(_, token)| {
            let (display, production) = token_display(&token.name, token.recognizer.as_ref());
            if let Some(alternatives) = production {
                productions.insert(display.clone(), alternatives);
            }
            display
        })
        .collect();

    for rule in decl.rules() {
        let parts: Vec<String> = rule
            .params
            .iter()
            .map(|param| param_display(&param.shape, decl, &names))
            .collect();
        let key = decl.kinds().resolve(rule.produces).to_owned();
        productions.entry(key).or_default().push(parts.join(" "));
    }

    let mut out = String::new();
    for (key, alternatives) in &productions {
        out.push_str(key);
        out.push_str(" ::=\n");
        for alternative in alternatives {
            out.push_str(format!("  | {alternative}").trim_end());
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// How a token appears in productions, plus its own production if it needs one.
fn token_display(name: &str, recognizer: Option<&Recognizer>) -> (String, Option<Vec<String>>) {
    let named = format!("'{}'", name.to_lowercase());
    match recognizer {
        Some(Recognizer::Literals(literals)) if literals.len() == 1 => {
            (format!("'{}'", literals[0]), None)
        }
        Some(Recognizer::Literals(literals)) => {
            let alternatives = literals.iter().map(|l| format!("'{l}'")).collect();
            (named, Some(alternatives))
        }
        Some(Recognizer::Pattern { pattern, .. }) => (named, Some(vec![format!("/{pattern}/")])),
        Some(Recognizer::Name) | None => (named, None),
    }
}

fn param_display(shape: &ParamShape, decl: &GrammarDecl, names: &[String]) -> String {
    let token = |id: TokenId| names.get(id as usize).map_or("?", String::as_str);
    match shape {
        ParamShape::Terminal { tokens, optional } => {
            let alternatives: Vec<&str> = tokens.iter().map(|&t| token(t)).collect();
            let joined = alternatives.join(" | ");
            match (alternatives.len(), optional) {
                (1, false) => joined,
                (_, true) => format!("[{joined}]"),
                (_, false) => format!("({joined})"),
            }
        }
        ParamShape::NonTerminal { kind, optional, .. } => {
            let name = decl.kinds().resolve(*kind);
            if *optional {
                format!("[{name}]")
            } else {
                name.to_owned()
            }
        }
        ParamShape::List {
            element,
            min,
            delimiter,
            ..
        } => {
            let e = decl.kinds().resolve(*element);
            let list = match delimiter {
                Some(ListDelimiter::Separator(t)) => format!("{e} {{{} {e}}}", token(*t)),
                Some(ListDelimiter::Terminator(t)) => {
                    let t = token(*t);
                    format!("{e} {t} {{{e} {t}}}")
                }
                None => format!("{e} {{{e}}}"),
            };
            if *min == 0 { format!("[{list}]") } else { list }
        }
    }
}
