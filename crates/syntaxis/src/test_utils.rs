//! Shared fixtures: a tiny `let` statement language.

use syntaxis_compiler::{GrammarBuilder, GrammarDecl};
use syntaxis_core::{TokenId, TokenRole, TokenTable};

use crate::Language;

pub const EOS: TokenId = 0;
pub const NUMBER: TokenId = 2;
pub const IDENT: TokenId = 3;
pub const LET: TokenId = 4;
pub const EQ: TokenId = 5;
pub const PLUS: TokenId = 6;
pub const SEMI: TokenId = 7;

pub fn let_tokens() -> TokenTable {
    let mut b = TokenTable::builder();
    b.token("EoS").role(TokenRole::End).add();
    b.token("Error").role(TokenRole::Error).add();
    b.token("Number").pattern("[0-9]+").add();
    let ident = b.token("Ident").pattern("[a-z]+").add();
    b.token("Let").literal("let").private_child_of(ident).add();
    b.token("Eq").literal("=").add();
    b.token("Plus").literal("+").add();
    b.token("Semi").literal(";").add();
    b.build().unwrap()
}

pub fn let_decl() -> GrammarDecl {
    let mut g = GrammarBuilder::new();
    g.rule("Num", "Expr").terminal("value", [NUMBER]).add();
    g.rule("Var", "Expr").terminal("name", [IDENT]).add();
    g.rule("Add", "Expr")
        .rank(1)
        .non_terminal("left", "Expr")
        .terminal("op", [PLUS])
        .non_terminal_up_to("right", "Expr", 0)
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

pub fn let_language() -> Language {
    Language::new(&let_tokens(), &let_decl(), "Program").unwrap()
}
