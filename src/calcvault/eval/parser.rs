use super::functions::{self, Function};
use super::lexer::{Spanned, Token};
use super::EvalError;

/// Upper bound on nested sub-expressions (parentheses, unary signs, powers).
pub(crate) const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Parsed expression.
///
/// Left-associative operator runs are kept flat in `Chain` so the tree depth
/// grows with nesting only, never with the number of terms.
#[derive(Debug)]
pub(crate) enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinOp, Expr)>,
    },
    Power {
        base: Box<Expr>,
        exponent: Box<Expr>,
    },
    Factorial {
        operand: Box<Expr>,
        times: usize,
    },
    Call {
        function: &'static Function,
        args: Vec<Expr>,
    },
}

pub(crate) fn parse(tokens: &[Spanned]) -> Result<Expr, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(extra) => Err(unexpected(extra)),
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    cursor: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&'a Spanned> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek().is_some_and(|s| &s.token == expected) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), EvalError> {
        match self.advance() {
            Some(s) if &s.token == expected => Ok(()),
            Some(s) => Err(unexpected(s)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Expr, EvalError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.cursor += 1;
            rest.push((op, self.term()?));
        }
        Ok(chain(first, rest))
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<Expr, EvalError> {
        let first = self.unary()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Rem,
                _ => break,
            };
            self.cursor += 1;
            rest.push((op, self.unary()?));
        }
        Ok(chain(first, rest))
    }

    // unary := ('+' | '-') unary | power
    //
    // Every recursive path of the grammar passes through here, so this is
    // where nesting depth is bounded.
    fn unary(&mut self) -> Result<Expr, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        let result = if self.eat(&Token::Minus) {
            self.unary().map(|e| Expr::Negate(Box::new(e)))
        } else if self.eat(&Token::Plus) {
            self.unary()
        } else {
            self.power()
        };
        self.depth -= 1;
        result
    }

    // power := postfix ('^' unary)?
    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.postfix()?;
        if self.eat(&Token::Caret) {
            let exponent = self.unary()?;
            return Ok(Expr::Power {
                base: Box::new(base),
                exponent: Box::new(exponent),
            });
        }
        Ok(base)
    }

    // postfix := primary '!'*
    fn postfix(&mut self) -> Result<Expr, EvalError> {
        let operand = self.primary()?;
        let mut times = 0;
        while self.eat(&Token::Bang) {
            times += 1;
        }
        if times == 0 {
            Ok(operand)
        } else {
            Ok(Expr::Factorial {
                operand: Box::new(operand),
                times,
            })
        }
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let Some(spanned) = self.advance() else {
            return Err(EvalError::UnexpectedEnd);
        };
        match &spanned.token {
            Token::Number(value) => Ok(Expr::Number(*value)),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    self.call(name)
                } else {
                    functions::constant(name)
                        .map(Expr::Number)
                        .ok_or_else(|| EvalError::UnknownSymbol(name.clone()))
                }
            }
            _ => Err(unexpected(spanned)),
        }
    }

    fn call(&mut self, name: &str) -> Result<Expr, EvalError> {
        let function =
            functions::function(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;

        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.expr()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RParen)?;
                break;
            }
        }

        function.check_arity(args.len())?;
        Ok(Expr::Call { function, args })
    }
}

fn chain(first: Expr, rest: Vec<(BinOp, Expr)>) -> Expr {
    if rest.is_empty() {
        first
    } else {
        Expr::Chain {
            first: Box::new(first),
            rest,
        }
    }
}

fn unexpected(spanned: &Spanned) -> EvalError {
    EvalError::UnexpectedToken {
        found: spanned.token.describe(),
        pos: spanned.pos,
    }
}
