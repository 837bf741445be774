use crate::{
    ast::{
        ast::Stmt,
        expressions::IdentifierExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement and the optional `;` that ends it.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    let stmt = match handler {
        Some(handler) => handler(parser)?,
        None => parse_expression_stmt(parser)?,
    };

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(stmt)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();

    let name = parse_identifier(parser)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses `{ <stmt>* }`. Stops at EOF so an unclosed block reports a
/// missing `}` instead of looping.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.enter_nested()?;
    let block = parse_block_body(parser);
    parser.exit_nested();

    block
}

fn parse_block_body(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let token = parser.expect(TokenKind::OpenCurly)?;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt { token, body })
}

pub fn parse_identifier(parser: &mut Parser) -> Result<IdentifierExpr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    Ok(IdentifierExpr {
        value: token.literal.clone(),
        token,
    })
}
