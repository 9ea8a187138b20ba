//! Tokenizer for the restricted formula language.

use fermi_core::errors::ExpressionError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset of the token's first character.
    pub offset: usize,
}

/// Tokenize `input`. `×` and `·` read as `*`, `÷` as `/`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let offset = i;
        let kind = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' | '×' | '·' => TokenKind::Star,
            '/' | '÷' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, i)) => {
                let end = scan_number(&chars, i);
                let text: String = chars[i..end].iter().filter(|c| **c != '_').collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExpressionError::UnexpectedToken {
                        found: format!("malformed number '{text}'"),
                        offset,
                    })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    offset,
                });
                i = end;
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = i;
                while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_')
                {
                    end += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(chars[i..end].iter().collect()),
                    offset,
                });
                i = end;
                continue;
            }
            other => return Err(ExpressionError::UnexpectedCharacter { ch: other, offset }),
        };
        tokens.push(Token { kind, offset });
        i += 1;
    }
    Ok(tokens)
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(char::is_ascii_digit)
}

/// End index of a numeric literal: digits, `_` separators, one `.`, optional exponent.
fn scan_number(chars: &[char], start: usize) -> usize {
    let mut end = start;
    let mut seen_dot = false;
    while end < chars.len() {
        match chars[end] {
            c if c.is_ascii_digit() || c == '_' => end += 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if end < chars.len() && matches!(chars[end], 'e' | 'E') {
        let mut exp = end + 1;
        if exp < chars.len() && matches!(chars[exp], '+' | '-') {
            exp += 1;
        }
        if exp < chars.len() && chars[exp].is_ascii_digit() {
            while exp < chars.len() && chars[exp].is_ascii_digit() {
                exp += 1;
            }
            end = exp;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn unicode_operators_are_normalized() {
        assert_eq!(
            kinds("a × b · c ÷ 2"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Star,
                TokenKind::Ident("b".into()),
                TokenKind::Star,
                TokenKind::Ident("c".into()),
                TokenKind::Slash,
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn numbers_with_separators_and_exponents() {
        assert_eq!(kinds("1_000"), vec![TokenKind::Number(1000.0)]);
        assert_eq!(kinds("2.5e3"), vec![TokenKind::Number(2500.0)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
    }

    #[test]
    fn exponent_letter_without_digits_stays_an_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Ident("e".into())]
        );
    }

    #[test]
    fn rejects_foreign_characters() {
        assert_eq!(
            tokenize("a ^ 2"),
            Err(ExpressionError::UnexpectedCharacter { ch: '^', offset: 2 })
        );
        assert!(tokenize("a.b").is_err());
        assert!(tokenize("a < b").is_err());
        assert!(tokenize("x; y").is_err());
    }
}
