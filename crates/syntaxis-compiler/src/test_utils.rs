//! Shared fixtures for compiler tests.

use syntaxis_core::{Grammar, TokenRole, TokenTable};

use crate::declare::{GrammarBuilder, GrammarDecl, ListDelimiter};

/// Token ids of the calculator fixture.
pub mod calc_tokens {
    use syntaxis_core::TokenId;

    pub const EOS: TokenId = 0;
    pub const NUMBER: TokenId = 2;
    pub const IDENT: TokenId = 3;
    pub const LET: TokenId = 4;
    pub const ADD_OP: TokenId = 5;
    pub const MINUS: TokenId = 6;
    pub const STAR: TokenId = 7;
    pub const LPAREN: TokenId = 8;
    pub const RPAREN: TokenId = 9;
    pub const COMMA: TokenId = 10;
    pub const SEMI: TokenId = 11;
    pub const EQ: TokenId = 12;
}

/// Tokens of a small calculator language.
///
/// `Let` is a private child of `Ident`, `Minus` a public child of `AddOp`.
pub fn calc_token_table() -> TokenTable {
    let mut b = TokenTable::builder();
    b.token("EoS").role(TokenRole::End).add();
    b.token("Error").role(TokenRole::Error).add();
    b.token("Number").pattern("[0-9]+").add();
    let ident = b.token("Ident").pattern("[a-z]+").add();
    b.token("Let").literal("let").private_child_of(ident).add();
    let add_op = b.token("AddOp").literals(["+", "-"]).add();
    b.token("Minus").literal("-").child_of(add_op).add();
    b.token("Star").literal("*").add();
    b.token("LParen").literal("(").add();
    b.token("RParen").literal(")").add();
    b.token("Comma").literal(",").add();
    b.token("Semi").literal(";").add();
    b.token("Eq").literal("=").add();
    b.build().unwrap()
}

/// Expressions at three ranks, `let` statements and a program of statements.
pub fn calc_decl() -> GrammarDecl {
    use calc_tokens::*;

    let mut g = GrammarBuilder::new();
    g.rule("Num", "Expr").terminal("value", [NUMBER]).add();
    g.rule("Var", "Expr").terminal("name", [IDENT]).add();
    g.rule("Call", "Expr")
        .terminal("callee", [IDENT])
        .terminal("open", [LPAREN])
        .list("args", "Expr", 0, Some(ListDelimiter::Separator(COMMA)))
        .terminal("close", [RPAREN])
        .add();
    g.rule("Paren", "Expr")
        .terminal("open", [LPAREN])
        .non_terminal("inner", "Expr")
        .terminal("close", [RPAREN])
        .add();
    g.rule("Mul", "Expr")
        .rank(1)
        .non_terminal_up_to("left", "Expr", 1)
        .terminal("op", [STAR])
        .non_terminal_up_to("right", "Expr", 0)
        .add();
    g.rule("Add", "Expr")
        .rank(2)
        .non_terminal_up_to("left", "Expr", 2)
        .terminal("op", [ADD_OP])
        .non_terminal_up_to("right", "Expr", 1)
        .add();
    g.rule("Let", "Stmt")
        .terminal("kw", [LET])
        .terminal("name", [IDENT])
        .terminal("eq", [EQ])
        .non_terminal("value", "Expr")
        .terminal("semi", [SEMI])
        .add();
    g.rule("Program", "Program")
        .list("stmts", "Stmt", 1, None)
        .add();
    g.build()
}

pub fn calc_grammar() -> Grammar {
    crate::compile(&calc_token_table(), &calc_decl(), "Program").unwrap()
}

/// End-of-stream, error and the given tokens, in order.
pub fn token_table(names: &[&str]) -> TokenTable {
    let mut b = TokenTable::builder();
    b.token("EoS").role(TokenRole::End).add();
    b.token("Error").role(TokenRole::Error).add();
    for name in names {
        b.token(*name).literal(name.to_lowercase()).add();
    }
    b.build().unwrap()
}
