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

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_block_stmt, parse_identifier},
};

/// Precedence climbing: parse a prefix form, then keep folding infix
/// operators into the left operand while they bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nested()?;
    let expr = parse_expr_at(parser, bp);
    parser.exit_nested();

    expr
}

fn parse_expr_at(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(no_prefix_error(parser)),
    };

    let mut left = nud(parser)?;

    // While the current token is an infix operator binding tighter than bp,
    // continue parsing with left as its lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        let led_bp = parser.current_binding_power();
        left = led(parser, left, led_bp)?;
    }

    Ok(left)
}

fn no_prefix_error(parser: &Parser) -> Error {
    let token = parser.current_token();

    let error = if token.kind == TokenKind::Illegal {
        ErrorImpl::UnrecognisedToken {
            token: token.literal.clone(),
        }
    } else {
        ErrorImpl::NoPrefixParseFn {
            kind: token.kind,
            token: token.literal.clone(),
        }
    };

    Error::new(error, token.span.start)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Integer => {
            // Consumed even when out of range so the literal is reported once.
            let token = parser.advance();

            match token.literal.parse::<i64>() {
                Ok(value) => Ok(Expr::Integer(IntegerExpr { token, value })),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.literal.clone(),
                    },
                    token.span.start,
                )),
            }
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::Identifier(IdentifierExpr {
                value: token.literal.clone(),
                token,
            }))
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Expr::Boolean(BooleanExpr {
                value: token.kind == TokenKind::True,
                token,
            }))
        }
        _ => Err(no_prefix_error(parser)),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();

    // Same bp for the rhs keeps equal-precedence chains left-associative.
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let token = parser.advance();
    let arguments = parse_call_arguments(parser)?;

    Ok(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}

/// Parses `<expr> (, <expr>)* )` or a bare `)`, the opening `(` already
/// consumed.
fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut args = vec![];

    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(args);
    }

    args.push(parse_expr(parser, BindingPower::Default)?);
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        args.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(args)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
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
    let token = parser.advance();

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        parameters.push(parse_identifier(parser)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            parameters.push(parse_identifier(parser)?);
        }

        parser.expect(TokenKind::CloseParen)?;
    }

    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(FunctionExpr {
        token,
        parameters,
        body,
    }))
}
