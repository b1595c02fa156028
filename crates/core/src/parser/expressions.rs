//! Recursive-descent expression parsing over token slices.
//!
//! The entry point takes a token sequence believed to represent exactly
//! one expression. The leading construct is classified by a fixed
//! priority order, consumed exactly, and then checked for an operator
//! continuation: if the next non-newline token is an operator (and not
//! the last token), everything before it becomes the left operand and the
//! whole remaining tail is parsed recursively as the right operand.
//!
//! There is deliberately no precedence handling: `A op1 B op2 C` always
//! splits at `op1`, so unparenthesized chains associate to the right and
//! only explicit parentheses (preserved as [`Expr::Grouping`]) override
//! grouping. The downstream target language resolves precedence from the
//! structure and the raw operator text.

use crate::ast::{Expr, TemplatePart};
use crate::diag::ParseContext;
use crate::error::{CompileError, ErrorKind};
use crate::lexer::{self, Token};
use crate::scope;

/// Parse one complete expression. Leftover tokens after the expression
/// (other than newlines) are an unexpected-token error.
pub fn parse_expression(tokens: &[Token], ctx: &mut ParseContext) -> Result<Expr, CompileError> {
    let tokens = skip_newlines(tokens, ctx);
    if tokens.is_empty() {
        return Err(ctx.error(ErrorKind::InvalidExpression("empty expression".to_owned())));
    }

    let (expr, end) = parse_leading(tokens, ctx)?;

    // Operator continuation: skip newlines after the consumed construct
    // and look for an infix operator that is not the last token.
    let mut i = end;
    while i < tokens.len() && tokens[i] == Token::Newline {
        ctx.bump();
        i += 1;
    }
    if i < tokens.len() {
        if let Token::Op(op) = &tokens[i] {
            if i + 1 < tokens.len() {
                let right = parse_expression(&tokens[i + 1..], ctx)?;
                return Ok(Expr::Operation {
                    left: Box::new(expr),
                    op: op.clone(),
                    right: Box::new(right),
                });
            }
        }
        return Err(ctx.error(ErrorKind::UnexpectedToken(tokens[i].describe())));
    }

    Ok(expr)
}

/// Classify and consume the leading construct, returning it together with
/// the index of the first token after it. Pattern order is significant:
/// call and list-access must be tried before bare identifier.
fn parse_leading(tokens: &[Token], ctx: &mut ParseContext) -> Result<(Expr, usize), CompileError> {
    match &tokens[0] {
        Token::LParen => {
            let (open, close) = scope::find_scope(tokens, &Token::LParen, &Token::RParen, 0)
                .ok_or_else(|| ctx.error(ErrorKind::MissingParen))?;
            let interior = &tokens[open + 1..close];
            if interior.iter().all(|t| *t == Token::Newline) {
                return Err(ctx.error(ErrorKind::InvalidExpression(
                    "empty parenthesized group".to_owned(),
                )));
            }
            let inner = parse_expression(interior, ctx)?;
            Ok((Expr::Grouping(Box::new(inner)), close + 1))
        }
        Token::Op(op) if lexer::is_prefix_operator(op) => {
            if tokens.len() < 2 {
                return Err(ctx.error(ErrorKind::MissingToken(format!(
                    "operand after prefix operator '{}'",
                    op
                ))));
            }
            let operand = parse_expression(&tokens[1..], ctx)?;
            Ok((
                Expr::Prefix {
                    op: op.clone(),
                    operand: Box::new(operand),
                },
                tokens.len(),
            ))
        }
        Token::LBracket => {
            let (open, close) = scope::find_scope(tokens, &Token::LBracket, &Token::RBracket, 0)
                .ok_or_else(|| ctx.error(ErrorKind::MissingBracket))?;
            let elements = parse_expression_list(&tokens[open + 1..close], ctx)?;
            Ok((Expr::ListLiteral(elements), close + 1))
        }
        Token::Ident(name) if tokens.get(1) == Some(&Token::LParen) => {
            let (_, close) = scope::find_scope(tokens, &Token::LParen, &Token::RParen, 1)
                .ok_or_else(|| ctx.error(ErrorKind::MissingParen))?;
            let args = parse_expression_list(&tokens[2..close], ctx)?;
            Ok((
                Expr::Call {
                    name: name.clone(),
                    args,
                },
                close + 1,
            ))
        }
        Token::Ident(name) if tokens.get(1) == Some(&Token::LBracket) => {
            let (_, close) = scope::find_scope(tokens, &Token::LBracket, &Token::RBracket, 1)
                .ok_or_else(|| ctx.error(ErrorKind::MissingBracket))?;
            // The access index must be exactly one expression; a failing
            // inner parse rejects the whole access.
            let index = parse_expression(&tokens[2..close], ctx)?;
            Ok((
                Expr::ListAccess {
                    name: name.clone(),
                    index: Box::new(index),
                },
                close + 1,
            ))
        }
        Token::Ident(name) => Ok((Expr::Ident(name.clone()), 1)),
        Token::Int(n) => Ok((Expr::Int(*n), 1)),
        Token::Float(f) => Ok((Expr::Float(f.clone()), 1)),
        Token::Str(s) => {
            let expr = parse_string_literal(s, ctx)?;
            // Raw newlines inside the literal advance the file position;
            // interpolation errors above still carry the opening line.
            for _ in s.matches('\n') {
                ctx.bump();
            }
            Ok((expr, 1))
        }
        Token::Bool(b) => Ok((Expr::Bool(*b), 1)),
        other => Err(ctx.error(ErrorKind::InvalidExpression(format!(
            "cannot start an expression with {}",
            other.describe()
        )))),
    }
}

/// Shared routine for list literals, call arguments, and access indices:
/// split the scope interior on top-level commas and parse each segment as
/// a full expression. An interior of nothing but newlines is an empty
/// list. A failing element parse surfaces its error.
fn parse_expression_list(
    interior: &[Token],
    ctx: &mut ParseContext,
) -> Result<Vec<Expr>, CompileError> {
    if interior.iter().all(|t| *t == Token::Newline) {
        for _ in interior {
            ctx.bump();
        }
        return Ok(Vec::new());
    }
    scope::split_top_level(interior, &Token::Comma)
        .into_iter()
        .map(|segment| parse_expression(segment, ctx))
        .collect()
}

/// Scan a string literal's raw text for interpolation scopes: a `{` at
/// text position 0, or `$` immediately followed by `{` where the `$` is
/// not escaped by a backslash. Matching braces are found by depth
/// counting over the raw text, and each scope's content is re-tokenized
/// and parsed as a full expression. Without any scope the literal stays a
/// plain string node, payload unchanged.
fn parse_string_literal(raw: &str, ctx: &mut ParseContext) -> Result<Expr, CompileError> {
    let chars: Vec<char> = raw.chars().collect();
    let mut parts: Vec<TemplatePart> = Vec::new();
    let mut lit_start = 0usize;
    let mut i = 0usize;
    let mut found = false;

    while i < chars.len() {
        let brace = if chars[i] == '{' && i == 0 {
            Some(i)
        } else if chars[i] == '$'
            && chars.get(i + 1) == Some(&'{')
            && !is_backslash_escaped(&chars, i)
        {
            Some(i + 1)
        } else {
            None
        };
        let Some(brace) = brace else {
            i += 1;
            continue;
        };

        let mut depth = 0i32;
        let mut close = None;
        for (j, c) in chars.iter().enumerate().skip(brace) {
            if *c == '{' {
                depth += 1;
            } else if *c == '}' {
                depth -= 1;
                if depth == 0 {
                    close = Some(j);
                    break;
                }
            }
        }
        let close = close.ok_or_else(|| ctx.error(ErrorKind::MissingBrace))?;
        if close == brace + 1 {
            return Err(ctx.error(ErrorKind::Unknown(
                "zero-length interpolation scope".to_owned(),
            )));
        }

        found = true;
        let frag_end = if chars[i] == '$' { i } else { brace };
        if frag_end > lit_start {
            parts.push(TemplatePart::Fragment(
                chars[lit_start..frag_end].iter().collect(),
            ));
        }

        let content: String = chars[brace + 1..close].iter().collect();
        // Newlines inside the raw text were already counted when the
        // string token was produced, so the re-parse works on a scratch
        // context and its line advances are discarded.
        let mut inner_ctx = ParseContext::at(&ctx.file, ctx.line);
        let inner_tokens = lexer::tokenize_at(&content, &ctx.file, ctx.line)?;
        let expr = parse_expression(&inner_tokens, &mut inner_ctx)?;
        parts.push(TemplatePart::Expr(expr));

        lit_start = close + 1;
        i = close + 1;
    }

    if !found {
        return Ok(Expr::Str(raw.to_owned()));
    }
    if lit_start < chars.len() {
        parts.push(TemplatePart::Fragment(chars[lit_start..].iter().collect()));
    }
    Ok(Expr::TemplatedStr(parts))
}

fn is_backslash_escaped(chars: &[char], i: usize) -> bool {
    let mut backslashes = 0usize;
    let mut k = i;
    while k > 0 && chars[k - 1] == '\\' {
        backslashes += 1;
        k -= 1;
    }
    backslashes % 2 == 1
}

/// Skip leading newline tokens, counting each one into the context.
pub(crate) fn skip_newlines<'a>(tokens: &'a [Token], ctx: &mut ParseContext) -> &'a [Token] {
    let mut start = 0usize;
    while start < tokens.len() && tokens[start] == Token::Newline {
        ctx.bump();
        start += 1;
    }
    &tokens[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(src: &str) -> Result<Expr, CompileError> {
        let tokens = tokenize(src, "test.mqt")?;
        let mut ctx = ParseContext::new("test.mqt");
        parse_expression(&tokens, &mut ctx)
    }

    fn op(left: Expr, operator: &str, right: Expr) -> Expr {
        Expr::Operation {
            left: Box::new(left),
            op: operator.to_owned(),
            right: Box::new(right),
        }
    }

    #[test]
    fn whitespace_and_newlines_do_not_change_the_ast() {
        let compact = parse("1 plus 2").unwrap();
        let spread = parse("1   plus\n2").unwrap();
        assert_eq!(compact, spread);
        assert_eq!(compact, op(Expr::Int(1), "plus", Expr::Int(2)));
    }

    #[test]
    fn chains_lean_right_with_no_precedence() {
        let expr = parse("1 plus 2 times 3").unwrap();
        assert_eq!(
            expr,
            op(Expr::Int(1), "plus", op(Expr::Int(2), "times", Expr::Int(3)))
        );
    }

    #[test]
    fn parentheses_override_grouping_and_are_preserved() {
        let expr = parse("(1 plus 2) times 3").unwrap();
        assert_eq!(
            expr,
            op(
                Expr::Grouping(Box::new(op(Expr::Int(1), "plus", Expr::Int(2)))),
                "times",
                Expr::Int(3)
            )
        );
    }

    #[test]
    fn leaf_forms() {
        assert_eq!(parse("42").unwrap(), Expr::Int(42));
        assert_eq!(parse("1.5").unwrap(), Expr::Float("1.5".to_owned()));
        assert_eq!(parse("true").unwrap(), Expr::Bool(true));
        assert_eq!(parse("name").unwrap(), Expr::Ident("name".to_owned()));
        assert_eq!(parse("\"hi\"").unwrap(), Expr::Str("hi".to_owned()));
    }

    #[test]
    fn prefix_operator_takes_the_whole_tail() {
        assert_eq!(
            parse("not true").unwrap(),
            Expr::Prefix {
                op: "not".to_owned(),
                operand: Box::new(Expr::Bool(true)),
            }
        );
        // The tail is one recursive expression, so the operation nests
        // inside the prefix node.
        assert_eq!(
            parse("not a && b").unwrap(),
            Expr::Prefix {
                op: "not".to_owned(),
                operand: Box::new(op(
                    Expr::Ident("a".to_owned()),
                    "&&",
                    Expr::Ident("b".to_owned())
                )),
            }
        );
        assert_eq!(
            parse("-5").unwrap(),
            Expr::Prefix {
                op: "-".to_owned(),
                operand: Box::new(Expr::Int(5)),
            }
        );
    }

    #[test]
    fn empty_list_literal() {
        assert_eq!(parse("[ ]").unwrap(), Expr::ListLiteral(Vec::new()));
        assert_eq!(parse("[]").unwrap(), Expr::ListLiteral(Vec::new()));
    }

    #[test]
    fn function_call_with_ordered_arguments() {
        assert_eq!(
            parse("foo(1, 2, 3)").unwrap(),
            Expr::Call {
                name: "foo".to_owned(),
                args: vec![Expr::Int(1), Expr::Int(2), Expr::Int(3)],
            }
        );
    }

    #[test]
    fn nested_call_arguments_keep_their_commas() {
        assert_eq!(
            parse("outer(inner(1, 2), 3)").unwrap(),
            Expr::Call {
                name: "outer".to_owned(),
                args: vec![
                    Expr::Call {
                        name: "inner".to_owned(),
                        args: vec![Expr::Int(1), Expr::Int(2)],
                    },
                    Expr::Int(3),
                ],
            }
        );
    }

    #[test]
    fn list_access_takes_exactly_one_index_expression() {
        assert_eq!(
            parse("myList[0]").unwrap(),
            Expr::ListAccess {
                name: "myList".to_owned(),
                index: Box::new(Expr::Int(0)),
            }
        );
        let err = parse("myList[1, 2]").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedToken(_)));
    }

    #[test]
    fn call_is_tried_before_bare_identifier() {
        // A lone identifier followed by leftover tokens must not parse.
        assert!(matches!(
            parse("foo 1").unwrap_err().kind,
            ErrorKind::UnexpectedToken(_)
        ));
        assert!(parse("foo(1)").is_ok());
    }

    #[test]
    fn failing_collection_element_surfaces_its_error() {
        let err = parse("[1, , 2]").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidExpression(_)));
    }

    #[test]
    fn interpolation_parts_keep_source_order() {
        let expr = parse(r#""a ${1 plus 2} b""#).unwrap();
        assert_eq!(
            expr,
            Expr::TemplatedStr(vec![
                TemplatePart::Fragment("a ".to_owned()),
                TemplatePart::Expr(op(Expr::Int(1), "plus", Expr::Int(2))),
                TemplatePart::Fragment(" b".to_owned()),
            ])
        );
    }

    #[test]
    fn leading_brace_starts_an_interpolation() {
        let expr = parse(r#""{x} rest""#).unwrap();
        assert_eq!(
            expr,
            Expr::TemplatedStr(vec![
                TemplatePart::Expr(Expr::Ident("x".to_owned())),
                TemplatePart::Fragment(" rest".to_owned()),
            ])
        );
    }

    #[test]
    fn escaped_dollar_is_literal_text() {
        let expr = parse(r#""cost: \${x}""#).unwrap();
        assert_eq!(expr, Expr::Str(r"cost: \${x}".to_owned()));
    }

    #[test]
    fn brace_after_position_zero_without_dollar_is_literal() {
        let expr = parse(r#""a {x} b""#).unwrap();
        assert_eq!(expr, Expr::Str("a {x} b".to_owned()));
    }

    #[test]
    fn nested_interpolation_reparses_recursively() {
        let expr = parse(r#""v: ${join([a, b], sep)}""#).unwrap();
        match expr {
            Expr::TemplatedStr(parts) => {
                assert_eq!(parts.len(), 2);
                assert!(matches!(parts[1], TemplatePart::Expr(Expr::Call { .. })));
            }
            other => panic!("expected templated string, got {:?}", other),
        }
    }

    #[test]
    fn unterminated_interpolation_is_a_missing_brace() {
        let err = parse(r#""x: ${1 plus""#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingBrace);
    }

    #[test]
    fn empty_parenthesized_group_is_invalid() {
        let err = parse("( )").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidExpression(_)));
    }

    #[test]
    fn unmatched_paren_line_is_the_opening_line() {
        let src = "\n\n\n\n(1 plus 2";
        let tokens = tokenize(src, "test.mqt").unwrap();
        let mut ctx = ParseContext::new("test.mqt");
        let err = parse_expression(&tokens, &mut ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingParen);
        assert_eq!(err.line, 5);
    }

    #[test]
    fn trailing_operator_is_not_a_continuation() {
        let err = parse("1 plus").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedToken(_)));
    }

    #[test]
    fn leftover_tokens_after_a_leaf_are_unexpected() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedToken("integer 2".to_owned())
        );
    }
}
