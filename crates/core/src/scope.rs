//! Balanced bracket range matching over token sequences.

use crate::lexer::Token;

/// Find the first occurrence of `open` at or after `from` and the index of
/// its correctly nested matching `close`. Returns `(open_index,
/// close_index)`, or `None` when the stream ends unbalanced (callers
/// convert that into a kind-specific missing-bracket error stamped with
/// the line of the opening token).
///
/// A depth counter increments on `open`, decrements on `close`, and
/// ignores every other token kind; depth returning to zero at a close
/// token marks the match.
pub fn find_scope(
    tokens: &[Token],
    open: &Token,
    close: &Token,
    from: usize,
) -> Option<(usize, usize)> {
    let start = tokens[from..].iter().position(|t| t == open)? + from;
    let mut depth = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(start) {
        if t == open {
            depth += 1;
        } else if t == close {
            depth -= 1;
            if depth == 0 {
                return Some((start, i));
            }
        }
    }
    None
}

/// Split a token slice on occurrences of `sep` that are not nested inside
/// any paren, bracket, or brace scope. Used for comma-separated
/// expression lists and parameter lists.
pub fn split_top_level<'a>(tokens: &'a [Token], sep: &Token) -> Vec<&'a [Token]> {
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, t) in tokens.iter().enumerate() {
        match t {
            Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace => depth -= 1,
            _ => {
                if depth == 0 && t == sep {
                    segments.push(&tokens[start..i]);
                    start = i + 1;
                }
            }
        }
    }
    segments.push(&tokens[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn lex(src: &str) -> Vec<Token> {
        tokenize(src, "test.mqt").unwrap()
    }

    #[test]
    fn matches_flat_scope() {
        let tokens = lex("(1)");
        assert_eq!(
            find_scope(&tokens, &Token::LParen, &Token::RParen, 0),
            Some((0, 2))
        );
    }

    #[test]
    fn matches_nested_scopes_at_every_depth() {
        let tokens = lex("((a), ((b)))");
        // Outermost
        assert_eq!(
            find_scope(&tokens, &Token::LParen, &Token::RParen, 0),
            Some((0, tokens.len() - 1))
        );
        // Inner scope starting at index 1
        assert_eq!(
            find_scope(&tokens, &Token::LParen, &Token::RParen, 1),
            Some((1, 3))
        );
    }

    #[test]
    fn search_starts_at_the_given_position() {
        let tokens = lex("(a) (b)");
        assert_eq!(
            find_scope(&tokens, &Token::LParen, &Token::RParen, 3),
            Some((3, 5))
        );
    }

    #[test]
    fn unbalanced_scope_is_not_found() {
        let tokens = lex("(a (b)");
        assert_eq!(find_scope(&tokens, &Token::LParen, &Token::RParen, 0), None);
    }

    #[test]
    fn ignores_other_bracket_kinds() {
        let tokens = lex("[a, (b)]");
        assert_eq!(
            find_scope(&tokens, &Token::LBracket, &Token::RBracket, 0),
            Some((0, tokens.len() - 1))
        );
    }

    #[test]
    fn split_skips_nested_commas() {
        let tokens = lex("a, f(b, c), [d, e]");
        let segments = split_top_level(&tokens, &Token::Comma);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], &lex("a")[..]);
        assert_eq!(segments[1], &lex(" f(b, c)")[..]);
        assert_eq!(segments[2], &lex(" [d, e]")[..]);
    }

    #[test]
    fn split_without_separator_yields_one_segment() {
        let tokens = lex("a plus b");
        let segments = split_top_level(&tokens, &Token::Comma);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], &tokens[..]);
    }
}
