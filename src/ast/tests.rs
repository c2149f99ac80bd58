//! Unit tests for AST rendering.
//!
//! Nodes are built by hand here so rendering is checked independently of
//! the parser.

use std::rc::Rc;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    ast::{Expr, Node, Program, Stmt},
    expressions::{CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr, PrefixExpr},
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

fn token(kind: TokenKind, value: &str) -> Token {
    let file = Rc::new("test.ark".to_string());
    Token {
        kind,
        value: value.to_string(),
        span: Span {
            start: Position(0, Rc::clone(&file)),
            end: Position(value.len() as u32, file),
        },
    }
}

fn ident(name: &str) -> IdentifierExpr {
    IdentifierExpr {
        token: token(TokenKind::Identifier, name),
        value: name.to_string(),
    }
}

fn int(value: i64) -> Expr {
    Expr::Integer(IntegerExpr {
        token: token(TokenKind::Int, &value.to_string()),
        value,
    })
}

fn infix(left: Expr, operator: &str, kind: TokenKind, right: Expr) -> Expr {
    Expr::Infix(InfixExpr {
        token: token(kind, operator),
        left: Box::new(left),
        operator: operator.to_string(),
        right: Box::new(right),
    })
}

fn expression_stmt(expression: Expr) -> Stmt {
    Stmt::Expression(ExpressionStmt {
        token: token(TokenKind::Identifier, expression.token_literal()),
        expression,
    })
}

#[test]
fn test_let_statement_rendering() {
    let program = Program {
        statements: vec![Stmt::Let(LetStmt {
            token: token(TokenKind::Let, "let"),
            name: ident("myVar"),
            value: Expr::Identifier(ident("anotherVar")),
        })],
    };

    assert_eq!(program.to_string(), "let myVar = anotherVar;");
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_return_statement_rendering() {
    let stmt = Stmt::Return(ReturnStmt {
        token: token(TokenKind::Return, "return"),
        return_value: infix(int(1), "+", TokenKind::Plus, int(2)),
    });

    assert_eq!(stmt.to_string(), "return (1 + 2);");
    assert_eq!(stmt.token_literal(), "return");
}

#[test]
fn test_prefix_and_infix_rendering() {
    let negated = Expr::Prefix(PrefixExpr {
        token: token(TokenKind::Dash, "-"),
        operator: "-".to_string(),
        right: Box::new(Expr::Identifier(ident("a"))),
    });
    let expr = infix(negated, "*", TokenKind::Star, Expr::Identifier(ident("b")));

    assert_eq!(expr.to_string(), "((-a) * b)");
    assert_eq!(expr.token_literal(), "*");
}

#[test]
fn test_block_terminates_expression_statements() {
    let block = BlockStmt {
        token: token(TokenKind::OpenCurly, "{"),
        statements: vec![
            expression_stmt(Expr::Identifier(ident("a"))),
            expression_stmt(Expr::Identifier(ident("b"))),
        ],
    };

    assert_eq!(block.to_string(), "{ a; b; }");

    let empty = BlockStmt {
        token: token(TokenKind::OpenCurly, "{"),
        statements: vec![],
    };
    assert_eq!(empty.to_string(), "{ }");
}

#[test]
fn test_function_and_call_rendering() {
    let body = BlockStmt {
        token: token(TokenKind::OpenCurly, "{"),
        statements: vec![expression_stmt(infix(
            Expr::Identifier(ident("x")),
            "+",
            TokenKind::Plus,
            Expr::Identifier(ident("y")),
        ))],
    };
    let function = Expr::Function(FunctionExpr {
        token: token(TokenKind::Fn, "fn"),
        parameters: vec![ident("x"), ident("y")],
        body,
    });

    assert_eq!(function.to_string(), "fn(x, y) { (x + y); }");

    let call = Expr::Call(CallExpr {
        token: token(TokenKind::OpenParen, "("),
        function: Box::new(Expr::Identifier(ident("add"))),
        arguments: vec![int(1), infix(int(2), "*", TokenKind::Star, int(3))],
    });

    assert_eq!(call.to_string(), "add(1, (2 * 3))");
    assert_eq!(call.token_literal(), "(");
}

#[test]
fn test_if_rendering() {
    let block = |name: &str| BlockStmt {
        token: token(TokenKind::OpenCurly, "{"),
        statements: vec![expression_stmt(Expr::Identifier(ident(name)))],
    };

    let without_else = Expr::If(IfExpr {
        token: token(TokenKind::If, "if"),
        condition: Box::new(Expr::Identifier(ident("ok"))),
        consequence: block("x"),
        alternative: None,
    });
    assert_eq!(without_else.to_string(), "if (ok) { x; }");

    let with_else = Expr::If(IfExpr {
        token: token(TokenKind::If, "if"),
        condition: Box::new(Expr::Identifier(ident("ok"))),
        consequence: block("x"),
        alternative: Some(block("y")),
    });
    assert_eq!(with_else.to_string(), "if (ok) { x; } else { y; }");
}

#[test]
fn test_program_concatenates_statements() {
    let program = Program {
        statements: vec![
            expression_stmt(infix(int(3), "+", TokenKind::Plus, int(4))),
            expression_stmt(int(5)),
        ],
    };

    assert_eq!(program.to_string(), "(3 + 4)5");
    assert_eq!(program.len(), 2);
    assert!(Program::default().is_empty());
    assert_eq!(Program::default().token_literal(), "");
}
