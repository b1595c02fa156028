//! Tokenizer for Maquette source text.
//!
//! Scans left to right, testing a fixed-priority ordered list of lexical
//! classes at each offset: comment, newline, inline whitespace, operator
//! (longest first, so `===` is never truncated to `==`), label
//! (keyword / boolean / identifier), string literal, float, integer, and
//! finally single-character punctuation. The first class that matches
//! wins; failure to match any class is a hard tokenization error.
//!
//! Newlines are preserved as tokens because line counting during parsing
//! depends on them. Inline whitespace and `#` comments produce nothing.

use crate::error::{CompileError, ErrorKind};

/// Reserved words of the language. The four primitive type names
/// (`boolean`, `text`, `number`, `list`) are deliberately not reserved;
/// the frontend does no type checking and treats them as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Model,
    Function,
    Let,
    Make,
    If,
    Else,
    While,
    Private,
    Static,
}

impl Keyword {
    fn from_word(w: &str) -> Option<Keyword> {
        match w {
            "model" => Some(Keyword::Model),
            "function" => Some(Keyword::Function),
            "let" => Some(Keyword::Let),
            "make" => Some(Keyword::Make),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "private" => Some(Keyword::Private),
            "static" => Some(Keyword::Static),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Model => "model",
            Keyword::Function => "function",
            Keyword::Let => "let",
            Keyword::Make => "make",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Private => "private",
            Keyword::Static => "static",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (anything word-shaped that is not reserved)
    Ident(String),
    Keyword(Keyword),
    Int(i64),
    /// Decimal literal -- kept as string to preserve exact representation
    Float(String),
    /// Quoted string literal; backslash escapes are passed through
    /// verbatim, never interpreted
    Str(String),
    Bool(bool),
    /// Infix or prefix operator, raw spelling preserved
    Op(String),
    // Punctuation
    Comma,
    Colon,
    Dot,
    Equals,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    /// Preserved for line counting; skipped (and counted) by the parser
    Newline,
}

impl Token {
    /// Short human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(w) => format!("identifier '{}'", w),
            Token::Keyword(k) => format!("keyword '{}'", k.as_str()),
            Token::Int(n) => format!("integer {}", n),
            Token::Float(f) => format!("number {}", f),
            Token::Str(_) => "string literal".to_owned(),
            Token::Bool(b) => format!("'{}'", b),
            Token::Op(o) => format!("operator '{}'", o),
            Token::Comma => "','".to_owned(),
            Token::Colon => "':'".to_owned(),
            Token::Dot => "'.'".to_owned(),
            Token::Equals => "'='".to_owned(),
            Token::LParen => "'('".to_owned(),
            Token::RParen => "')'".to_owned(),
            Token::LBracket => "'['".to_owned(),
            Token::RBracket => "']'".to_owned(),
            Token::LBrace => "'{'".to_owned(),
            Token::RBrace => "'}'".to_owned(),
            Token::Newline => "newline".to_owned(),
        }
    }
}

/// Operator spellings in match priority order: multi-character operators
/// before their single-character prefixes, word operators before plain
/// labels. Word operators only match on an identifier boundary, so
/// `android` still lexes as one identifier.
const OPERATORS: &[&str] = &[
    "===", "==", "!=", "<=", ">=", "&&", "||",
    "plus", "minus", "times", "over", "mod", "and", "or", "not",
    "<", ">", "+", "-", "*", "/", "%", "!",
];

/// Operators that may open an expression.
pub(crate) const PREFIX_OPERATORS: &[&str] = &["!", "-", "not"];

pub(crate) fn is_prefix_operator(op: &str) -> bool {
    PREFIX_OPERATORS.contains(&op)
}

pub fn tokenize(src: &str, file: &str) -> Result<Vec<Token>, CompileError> {
    tokenize_at(src, file, 1)
}

/// Tokenize starting at a given line number -- used when re-tokenizing
/// string interpolation content, which begins mid-file.
pub fn tokenize_at(src: &str, file: &str, start_line: u32) -> Result<Vec<Token>, CompileError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut line = start_line;

    while pos < chars.len() {
        let c = chars[pos];

        // Line comment -- discarded before the parser ever sees it
        if c == '#' {
            while pos < chars.len() && chars[pos] != '\n' {
                pos += 1;
            }
            continue;
        }

        if c == '\n' {
            tokens.push(Token::Newline);
            line += 1;
            pos += 1;
            continue;
        }

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        // Operators, before labels so word operators win over identifiers
        if let Some(op) = match_operator(&chars, pos) {
            pos += op.len();
            tokens.push(Token::Op(op.to_owned()));
            continue;
        }

        // Label: boolean literal, keyword, or identifier
        if c.is_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            let token = match word.as_str() {
                "true" => Token::Bool(true),
                "false" => Token::Bool(false),
                _ => match Keyword::from_word(&word) {
                    Some(k) => Token::Keyword(k),
                    None => Token::Ident(word),
                },
            };
            tokens.push(token);
            continue;
        }

        // String literal. Escape sequences are not interpreted here; the
        // backslash and the escaped character are both kept so the target
        // language receives them unchanged.
        if c == '"' {
            let open_line = line;
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(CompileError::new(
                        ErrorKind::MissingToken("closing '\"'".to_owned()),
                        file,
                        open_line,
                    ));
                }
                let sc = chars[pos];
                if sc == '"' {
                    pos += 1;
                    break;
                }
                if sc == '\\' {
                    s.push('\\');
                    pos += 1;
                    if pos < chars.len() {
                        if chars[pos] == '\n' {
                            line += 1;
                        }
                        s.push(chars[pos]);
                        pos += 1;
                    }
                    continue;
                }
                if sc == '\n' {
                    line += 1;
                }
                s.push(sc);
                pos += 1;
            }
            tokens.push(Token::Str(s));
            continue;
        }

        // Float before integer, so `1.5` is not split at the dot
        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos + 1 < chars.len() && chars[pos] == '.' && chars[pos + 1].is_ascii_digit() {
                pos += 1;
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
                let s: String = chars[start..pos].iter().collect();
                tokens.push(Token::Float(s));
            } else {
                let s: String = chars[start..pos].iter().collect();
                let n: i64 = s.parse().map_err(|_| {
                    CompileError::new(
                        ErrorKind::Unknown(format!("invalid integer '{}'", s)),
                        file,
                        line,
                    )
                })?;
                tokens.push(Token::Int(n));
            }
            continue;
        }

        // Single-character punctuation
        let token = match c {
            ',' => Token::Comma,
            ':' => Token::Colon,
            '.' => Token::Dot,
            '=' => Token::Equals,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            _ => {
                return Err(CompileError::new(
                    ErrorKind::UnrecognizedCharacter(c),
                    file,
                    line,
                ))
            }
        };
        tokens.push(token);
        pos += 1;
    }

    Ok(tokens)
}

fn match_operator(chars: &[char], pos: usize) -> Option<&'static str> {
    for op in OPERATORS {
        let n = op.len();
        if pos + n > chars.len() {
            continue;
        }
        if !chars[pos..pos + n].iter().zip(op.chars()).all(|(a, b)| *a == b) {
            continue;
        }
        // Word operators must end at an identifier boundary
        if op.starts_with(|ch: char| ch.is_alphabetic()) {
            if let Some(next) = chars.get(pos + n) {
                if next.is_alphanumeric() || *next == '_' {
                    continue;
                }
            }
        }
        return Some(op);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        tokenize(src, "test.mqt").expect("tokenize should succeed")
    }

    #[test]
    fn multi_char_operators_win_over_prefixes() {
        assert_eq!(lex("a === b")[1], Token::Op("===".to_owned()));
        assert_eq!(lex("a == b")[1], Token::Op("==".to_owned()));
        assert_eq!(lex("a <= b")[1], Token::Op("<=".to_owned()));
        assert_eq!(lex("a < b")[1], Token::Op("<".to_owned()));
        assert_eq!(lex("a && b")[1], Token::Op("&&".to_owned()));
    }

    #[test]
    fn word_operators_respect_identifier_boundaries() {
        assert_eq!(lex("1 plus 2")[1], Token::Op("plus".to_owned()));
        assert_eq!(lex("android")[0], Token::Ident("android".to_owned()));
        assert_eq!(lex("nothing")[0], Token::Ident("nothing".to_owned()));
        assert_eq!(lex("a and b")[1], Token::Op("and".to_owned()));
    }

    #[test]
    fn keywords_and_booleans_are_classified() {
        assert_eq!(lex("model")[0], Token::Keyword(Keyword::Model));
        assert_eq!(lex("let")[0], Token::Keyword(Keyword::Let));
        assert_eq!(lex("true")[0], Token::Bool(true));
        assert_eq!(lex("false")[0], Token::Bool(false));
        // Type names are plain identifiers
        assert_eq!(lex("number")[0], Token::Ident("number".to_owned()));
    }

    #[test]
    fn float_is_tried_before_integer() {
        assert_eq!(lex("1.5"), vec![Token::Float("1.5".to_owned())]);
        assert_eq!(lex("15"), vec![Token::Int(15)]);
        // A trailing dot is not a float
        assert_eq!(
            lex("1.x"),
            vec![
                Token::Int(1),
                Token::Dot,
                Token::Ident("x".to_owned()),
            ]
        );
    }

    #[test]
    fn string_escapes_pass_through_verbatim() {
        let tokens = lex(r#""a\nb \"quoted\"""#);
        assert_eq!(tokens, vec![Token::Str(r#"a\nb \"quoted\""#.to_owned())]);
    }

    #[test]
    fn unterminated_string_reports_opening_line() {
        let err = tokenize("let x = 1\nlet y = \"oops", "t.mqt").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ErrorKind::MissingToken(_)));
    }

    #[test]
    fn comments_are_discarded_and_newlines_preserved() {
        let tokens = lex("1 # a comment\n2");
        assert_eq!(tokens, vec![Token::Int(1), Token::Newline, Token::Int(2)]);
    }

    #[test]
    fn equals_is_punctuation_but_double_equals_is_an_operator() {
        assert_eq!(lex("x = 1")[1], Token::Equals);
        assert_eq!(lex("x == 1")[1], Token::Op("==".to_owned()));
    }

    #[test]
    fn unrecognized_character_is_a_hard_error() {
        let err = tokenize("let x = @", "t.mqt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedCharacter('@'));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn unrecognized_character_line_is_accurate() {
        let err = tokenize("a\nb\nc @", "t.mqt").unwrap_err();
        assert_eq!(err.line, 3);
    }
}
