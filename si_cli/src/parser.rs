//! Expression evaluator for `si-calc`.
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/") unary)*
//! unary   := "-" unary | postfix
//! postfix := primary ("^" integer)?
//! primary := number literal? | literal | "(" expr ")" | "sqrt" "(" expr ")"
//! literal := [prefix "_"] unit
//! ```
//!
//! Evaluation runs on [`DynQuantity`], so dimension errors surface as
//! [`UnitError`] values carrying the offending dimensions.

use si_core::{DefaultFloat, DynQuantity, UnitError, UnitResult};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(DefaultFloat),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Ident(name) => format!("'{}'", name),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Caret => "'^'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

/// Token with its byte offset in the input
type Spanned = (Token, usize);

fn tokenize(input: &str) -> UnitResult<Vec<Spanned>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;
        let single = match c {
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Star),
            b'/' => Some(Token::Slash),
            b'^' => Some(Token::Caret),
            b'(' => Some(Token::LParen),
            b')' => Some(Token::RParen),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push((token, start));
            pos += 1;
            continue;
        }

        if c.is_ascii_whitespace() {
            pos += 1;
        } else if c.is_ascii_digit() || c == b'.' {
            pos = scan_number(bytes, pos);
            let text = &input[start..pos];
            let value = text
                .parse::<DefaultFloat>()
                .map_err(|_| UnitError::parse_error(input, start, format!("invalid number '{}'", text)))?;
            tokens.push((Token::Number(value), start));
        } else if c.is_ascii_alphabetic() || c == b'_' {
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            tokens.push((Token::Ident(input[start..pos].to_string()), start));
        } else {
            let ch = input[start..].chars().next().unwrap_or('?');
            return Err(UnitError::parse_error(input, start, format!("unexpected character '{}'", ch)));
        }
    }

    Ok(tokens)
}

/// End offset of the number starting at `pos`: digits, a fraction and an
/// optional `e` exponent
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    let digits = |bytes: &[u8], mut pos: usize| {
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        pos
    };

    pos = digits(bytes, pos);
    if bytes.get(pos) == Some(&b'.') {
        pos = digits(bytes, pos + 1);
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        // `2e` followed by a name is a number then an identifier
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            pos = digits(bytes, exp);
        }
    }
    pos
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> UnitResult<Self> {
        Ok(Self {
            input,
            tokens: tokenize(input)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.input.len(), |(_, offset)| *offset)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, reason: impl Into<String>) -> UnitError {
        UnitError::parse_error(self.input, self.offset(), reason)
    }

    fn expect(&mut self, expected: Token) -> UnitResult<()> {
        match self.peek() {
            Some(token) if *token == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(self.error(format!("expected {}, found {}", expected.describe(), token.describe()))),
            None => Err(self.error(format!("expected {}, found end of input", expected.describe()))),
        }
    }

    fn parse(mut self) -> UnitResult<DynQuantity> {
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(token) => Err(self.error(format!("unexpected {}", token.describe()))),
        }
    }

    fn expr(&mut self) -> UnitResult<DynQuantity> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    lhs = lhs.try_add(self.term()?)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    lhs = lhs.try_sub(self.term()?)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> UnitResult<DynQuantity> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    lhs = lhs.try_mul(self.unary()?)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    lhs = lhs.try_div(self.unary()?)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> UnitResult<DynQuantity> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.postfix()
    }

    fn postfix(&mut self) -> UnitResult<DynQuantity> {
        let base = self.primary()?;
        if self.peek() != Some(&Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        let exponent = self.integer()?;
        powi(base, exponent)
    }

    /// Signed integer exponent in the range of a dimension exponent
    fn integer(&mut self) -> UnitResult<i8> {
        let negative = self.peek() == Some(&Token::Minus);
        if negative {
            self.pos += 1;
        }
        let offset = self.offset();
        let magnitude = match self.next() {
            Some(Token::Number(n)) if n.fract() == 0.0 => n,
            _ => return Err(UnitError::parse_error(self.input, offset, "exponent must be an integer")),
        };
        let signed = if negative { -magnitude } else { magnitude };
        if signed < DefaultFloat::from(i8::MIN) || signed > DefaultFloat::from(i8::MAX) {
            return Err(UnitError::parse_error(self.input, offset, "exponent out of range"));
        }
        Ok(signed as i8)
    }

    fn primary(&mut self) -> UnitResult<DynQuantity> {
        let offset = self.offset();
        match self.next() {
            Some(Token::Number(value)) => match self.peek() {
                Some(Token::Ident(name)) if name != "sqrt" => {
                    let name = name.clone();
                    self.pos += 1;
                    DynQuantity::from_literal(value, &name)
                }
                _ => Ok(DynQuantity::scalar(value)),
            },
            Some(Token::Ident(name)) if name == "sqrt" => {
                self.expect(Token::LParen)?;
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                inner.sqrt()
            }
            Some(Token::Ident(name)) => DynQuantity::from_literal(1.0, &name),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(UnitError::parse_error(
                self.input,
                offset,
                format!("unexpected {}", token.describe()),
            )),
            None => Err(UnitError::parse_error(self.input, offset, "unexpected end of input")),
        }
    }
}

fn powi(base: DynQuantity, exponent: i8) -> UnitResult<DynQuantity> {
    let mut result = DynQuantity::scalar(1.0);
    for _ in 0..exponent.unsigned_abs() {
        result = result.try_mul(base)?;
    }
    if exponent < 0 {
        result = result.try_recip()?;
    }
    Ok(result)
}

/// Parse and evaluate an expression such as `1.5 k_meter / 60 second`
pub fn evaluate(input: &str) -> UnitResult<DynQuantity> {
    let result = Parser::new(input)?.parse();
    if let Err(err) = &result {
        tracing::debug!(input, error = %err, "evaluation failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use si_core::DimensionVector;

    const SPEED: DimensionVector = DimensionVector::new(1, 0, -1, 0, 0, 0, 0);

    #[test]
    fn test_literal_with_prefix() {
        let q = evaluate("1.5 k_meter / 60 second").unwrap();
        assert_relative_eq!(q.value(), 25.0);
        assert_eq!(q.dimension(), SPEED);
        assert_eq!(q.to_string(), "25 m / s");
    }

    #[test]
    fn test_bare_literal_is_one_unit() {
        let q = evaluate("meter / second").unwrap();
        assert_eq!(q.value(), 1.0);
        assert_eq!(q.dimension(), SPEED);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("1 + 2 * 3").unwrap().to_number().unwrap(), 7.0);
        assert_eq!(evaluate("(1 + 2) * 3").unwrap().to_number().unwrap(), 9.0);
        assert_eq!(evaluate("-2 ^ 2").unwrap().to_number().unwrap(), -4.0);
        assert_eq!(evaluate("8 / 2 / 2").unwrap().to_number().unwrap(), 2.0);
    }

    #[test]
    fn test_powers() {
        let area = evaluate("3 meter ^ 2").unwrap();
        assert_eq!(area.dimension(), DimensionVector::new(2, 0, 0, 0, 0, 0, 0));

        let freq = evaluate("second ^ -1").unwrap();
        assert_eq!(freq.dimension(), DimensionVector::new(0, 0, -1, 0, 0, 0, 0));

        let one = evaluate("meter ^ 0").unwrap();
        assert_eq!(one.value(), 1.0);
        assert!(one.is_scalar());
        assert!(evaluate("meter ^ 1.5").is_err());
        assert!(evaluate("meter ^ 200").is_err());
    }

    #[test]
    fn test_sqrt() {
        let q = evaluate("sqrt(16 meter * meter)").unwrap();
        assert_eq!(q.value(), 4.0);
        assert_eq!(q.dimension(), DimensionVector::new(1, 0, 0, 0, 0, 0, 0));

        let err = evaluate("sqrt(2 meter)").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ROOT_DIMENSION");
    }

    #[test]
    fn test_override_symbol() {
        assert_eq!(evaluate("2 ampere * ohm").unwrap().to_string(), "2 V");
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = evaluate("meter + second").unwrap_err();
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(evaluate("3 furlong").unwrap_err().error_code(), "UNKNOWN_UNIT");
        assert_eq!(evaluate("3 q_meter").unwrap_err().error_code(), "UNKNOWN_PREFIX");
    }

    #[test]
    fn test_scientific_notation() {
        let q = evaluate("2.5e3 meter").unwrap();
        assert_eq!(q.value(), 2500.0);
        let q = evaluate("1e-3 second").unwrap();
        assert_relative_eq!(q.value(), 0.001);
    }

    #[test]
    fn test_parse_errors() {
        match evaluate("2 * (meter").unwrap_err() {
            UnitError::ParseError { position, .. } => assert_eq!(position, 10),
            other => panic!("unexpected error: {other:?}"),
        }
        match evaluate("2 $ 3").unwrap_err() {
            UnitError::ParseError { position, reason, .. } => {
                assert_eq!(position, 2);
                assert!(reason.contains('$'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(evaluate("").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(evaluate("1 2").unwrap_err().error_code(), "PARSE_ERROR");
    }
}
