use crate::{
    ast::{
        ast::Stmt,
        expressions::IdentifierExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

// Statement parsers start on the statement's first token and leave the
// cursor on its last one. A trailing `;` is consumed when present.

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.current_token_kind() {
        TokenKind::Let => parse_let_stmt(parser),
        TokenKind::Return => parse_return_stmt(parser),
        _ => parse_expression_stmt(parser),
    }
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = IdentifierExpr {
        value: name_token.value.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let return_value = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(Stmt::Return(ReturnStmt { token, return_value }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let expression = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// Parses `{ ... }` starting on the opening brace and ending on the
/// closing one. Failed inner statements are reported and skipped like
/// top-level ones.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let mut statements = Vec::new();
    while !parser.current_token_is(TokenKind::CloseCurly) {
        if parser.current_token_is(TokenKind::EOF) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: TokenKind::CloseCurly,
                    found: TokenKind::EOF,
                },
                parser.get_position(),
            ));
        }

        match parse_stmt(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                // The failing token closes this block
                if parser.current_token_is(TokenKind::CloseCurly) {
                    parser.report(error);
                    continue;
                }
                parser.recover(error);
            }
        }
        parser.advance();
    }

    Ok(BlockStmt { token, statements })
}

fn skip_semicolon(parser: &mut Parser) {
    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }
}
