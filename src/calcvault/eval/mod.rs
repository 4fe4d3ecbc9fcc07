//! # Expression Evaluator
//!
//! Note bodies are untrusted text. They are evaluated here against a fixed
//! arithmetic grammar and nothing else: there is no variable assignment, no
//! user-defined function, and no path from note text to host code. Every
//! identifier must name one of the built-in constants or functions.
//!
//! Evaluation is a pure function of the input string. Invalid input yields an
//! [`EvalError`]; there are no partial results.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := postfix ('^' unary)?
//! postfix := primary '!'*
//! primary := number | ident | ident '(' args ')' | '(' expr ')'
//! ```
//!
//! `^` is right associative and binds tighter than unary minus, so `-2^2`
//! is `-4`. `%` is a floored modulo.

use std::fmt;
use thiserror::Error;

mod functions;
mod lexer;
mod parser;

use parser::{BinOp, Expr};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unexpected '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: String,
        found: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("{function} is undefined for {value}")]
    Domain { function: String, value: String },

    #[error("result of {operation} is not a finite number")]
    NotFinite { operation: String },

    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

/// A successfully evaluated result.
///
/// Always finite. `Display` renders integral values without a fractional
/// part and switches to exponent notation for very large or very small
/// magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric(f64);

impl Numeric {
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 {
            return f.write_str("0");
        }
        let magnitude = v.abs();
        if magnitude >= 1e21 || magnitude < 1e-6 {
            let formatted = format!("{:e}", v);
            match formatted.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, exp)
                }
                _ => f.write_str(&formatted),
            }
        } else {
            write!(f, "{}", v)
        }
    }
}

/// Evaluates `text` as an arithmetic expression.
pub fn evaluate(text: &str) -> Result<Numeric, EvalError> {
    let tokens = lexer::tokenize(text)?;
    let expr = parser::parse(&tokens)?;
    let value = eval(&expr)?;
    finite("expression", value, || text.trim().to_string()).map(Numeric)
}

fn eval(expr: &Expr) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Negate(inner) => Ok(-eval(inner)?),
        Expr::Chain { first, rest } => {
            let mut acc = eval(first)?;
            for (op, operand) in rest {
                let rhs = eval(operand)?;
                acc = binary(*op, acc, rhs)?;
            }
            Ok(acc)
        }
        Expr::Power { base, exponent } => {
            let (b, x) = (eval(base)?, eval(exponent)?);
            finite("^", b.powf(x), || format!("{} ^ {}", Numeric(b), Numeric(x)))
        }
        Expr::Factorial { operand, times } => {
            let mut value = eval(operand)?;
            for _ in 0..*times {
                value = functions::factorial(value)?;
            }
            Ok(value)
        }
        Expr::Call { function, args } => {
            let values = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            let result = (function.apply)(&values)?;
            finite(function.name, result, || {
                let rendered: Vec<String> =
                    values.iter().map(|v| Numeric(*v).to_string()).collect();
                rendered.join(", ")
            })
        }
    }
}

fn binary(op: BinOp, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    let (symbol, result) = match op {
        BinOp::Add => ("+", lhs + rhs),
        BinOp::Sub => ("-", lhs - rhs),
        BinOp::Mul => ("*", lhs * rhs),
        BinOp::Div => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            ("/", lhs / rhs)
        }
        BinOp::Rem => ("%", functions::modulo(lhs, rhs)?),
    };
    finite(symbol, result, || {
        format!("{} {} {}", Numeric(lhs), symbol, Numeric(rhs))
    })
}

/// Rejects NaN as a domain error and infinities as overflow.
fn finite(
    name: &str,
    value: f64,
    describe: impl FnOnce() -> String,
) -> Result<f64, EvalError> {
    if value.is_nan() {
        Err(EvalError::Domain {
            function: name.to_string(),
            value: describe(),
        })
    } else if value.is_infinite() {
        Err(EvalError::NotFinite {
            operation: describe(),
        })
    } else {
        Ok(value)
    }
}
