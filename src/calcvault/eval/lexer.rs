use super::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Bang,
    LParen,
    RParen,
    Comma,
}

impl Token {
    /// Source-like rendering used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(n) => super::Numeric::new(*n).to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Percent => "%".into(),
            Token::Caret => "^".into(),
            Token::Bang => "!".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Comma => ",".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, EvalError> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let end = scan_number(&chars, i);
            let end_byte = chars.get(end).map_or(input.len(), |(p, _)| *p);
            let text = &input[pos..end_byte];
            let value = text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| EvalError::InvalidNumber {
                    text: text.to_string(),
                    pos,
                })?;
            tokens.push(Spanned {
                token: Token::Number(value),
                pos,
            });
            i = end;
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let mut end = i;
            while end < chars.len() && (chars[end].1.is_alphanumeric() || chars[end].1 == '_') {
                end += 1;
            }
            let name: String = chars[i..end].iter().map(|(_, c)| c).collect();
            tokens.push(Spanned {
                token: Token::Ident(name),
                pos,
            });
            i = end;
            continue;
        }

        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Caret,
            '!' => Token::Bang,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            other => return Err(EvalError::UnexpectedChar { ch: other, pos }),
        };
        tokens.push(Spanned { token, pos });
        i += 1;
    }

    Ok(tokens)
}

/// Returns the index one past the end of the number starting at `start`.
///
/// The exponent part is only consumed when digits follow it, so `2e`
/// scans as the number `2` followed by the identifier `e`.
fn scan_number(chars: &[(usize, char)], start: usize) -> usize {
    let digit_at = |i: usize| chars.get(i).is_some_and(|(_, c)| c.is_ascii_digit());
    let char_at = |i: usize| chars.get(i).map(|(_, c)| *c);

    let mut i = start;
    while digit_at(i) {
        i += 1;
    }
    if char_at(i) == Some('.') {
        i += 1;
        while digit_at(i) {
            i += 1;
        }
    }
    if matches!(char_at(i), Some('e' | 'E')) {
        let mut j = i + 1;
        if matches!(char_at(j), Some('+' | '-')) {
            j += 1;
        }
        if digit_at(j) {
            i = j;
            while digit_at(i) {
                i += 1;
            }
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn splits_operators_and_numbers() {
        assert_eq!(
            kinds("3*(4-1)"),
            vec![
                Token::Number(3.0),
                Token::Star,
                Token::LParen,
                Token::Number(4.0),
                Token::Minus,
                Token::Number(1.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn reads_decimals_and_exponents() {
        assert_eq!(kinds("1.5"), vec![Token::Number(1.5)]);
        assert_eq!(kinds(".25"), vec![Token::Number(0.25)]);
        assert_eq!(kinds("2e3"), vec![Token::Number(2000.0)]);
        assert_eq!(kinds("2E-2"), vec![Token::Number(0.02)]);
    }

    #[test]
    fn dangling_exponent_is_an_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![Token::Number(2.0), Token::Ident("e".into())]
        );
    }

    #[test]
    fn records_byte_positions() {
        let tokens = tokenize("  12 + x").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|s| s.pos).collect();
        assert_eq!(positions, vec![2, 5, 7]);
    }

    #[test]
    fn rejects_foreign_characters() {
        assert_eq!(
            tokenize("1 ; 2"),
            Err(EvalError::UnexpectedChar { ch: ';', pos: 2 })
        );
        assert!(matches!(
            tokenize("alert(\"x\")"),
            Err(EvalError::UnexpectedChar { ch: '"', .. })
        ));
    }

    #[test]
    fn lone_dot_is_invalid_number() {
        assert!(matches!(
            tokenize("."),
            Err(EvalError::InvalidNumber { pos: 0, .. })
        ));
        assert!(matches!(
            tokenize("2 + ."),
            Err(EvalError::InvalidNumber { pos: 4, .. })
        ));
    }

    #[test]
    fn overflowing_literal_is_invalid_number() {
        assert_eq!(
            tokenize("1e400"),
            Err(EvalError::InvalidNumber {
                text: "1e400".into(),
                pos: 0
            })
        );
        let nines = "9".repeat(400);
        assert!(matches!(
            tokenize(&format!("2 + {}", nines)),
            Err(EvalError::InvalidNumber { pos: 4, .. })
        ));
    }
}
