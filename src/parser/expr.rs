use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr,
            PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

// Handlers start on their own token and leave the cursor on the last token
// of the expression they built.

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let result = parse_nested_expr(parser, bp);
    parser.leave_nesting();

    result
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(missing_prefix_error(parser)),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the ceiling, keep extending lhs
    while parser.peek_binding_power() > bp {
        let led = match parser.get_led_lookup().get(&parser.peek_token().kind) {
            Some(led) => *led,
            None => return Ok(left),
        };

        parser.advance();
        let binding_power = parser.binding_power(parser.current_token_kind());
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

fn missing_prefix_error(parser: &Parser) -> Error {
    let token = parser.current_token();
    let error = if token.kind == TokenKind::Illegal {
        ErrorImpl::UnrecognisedToken {
            token: token.value.clone(),
        }
    } else {
        ErrorImpl::MissingPrefixRule { kind: token.kind }
    };

    Error::new(error, parser.get_position())
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Int => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerExpr { token, value })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )),
        },
        TokenKind::Identifier => Ok(Expr::Identifier(IdentifierExpr {
            value: token.value.clone(),
            token,
        })),
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanExpr {
            value: token.kind == TokenKind::True,
            token,
        })),
        _ => Err(missing_prefix_error(parser)),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_fn_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_fn_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(FunctionExpr {
        token,
        parameters,
        body,
    }))
}

fn parse_fn_parameters(parser: &mut Parser) -> Result<Vec<IdentifierExpr>, Error> {
    let mut parameters = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    loop {
        let token = parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(IdentifierExpr {
            value: token.value.clone(),
            token,
        });

        if !parser.peek_token_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let mut arguments = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        while parser.peek_token_is(TokenKind::Comma) {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token,
        function: Box::new(left),
        arguments,
    }))
}
