//! Built-in constants and functions.
//!
//! The tables below are the whole vocabulary of the evaluator: an identifier
//! that is not listed here is rejected at parse time.

use super::EvalError;
use std::f64::consts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::Between(lo, hi) => (lo..=hi).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }

    fn describe(self) -> String {
        match self {
            Arity::Exactly(n) => n.to_string(),
            Arity::Between(lo, hi) => format!("{} to {}", lo, hi),
            Arity::AtLeast(n) => format!("at least {}", n),
        }
    }
}

pub(crate) struct Function {
    pub name: &'static str,
    pub arity: Arity,
    pub apply: fn(&[f64]) -> Result<f64, EvalError>,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Function {
    pub(crate) fn check_arity(&self, count: usize) -> Result<(), EvalError> {
        if self.arity.accepts(count) {
            Ok(())
        } else {
            Err(EvalError::Arity {
                name: self.name.to_string(),
                expected: self.arity.describe(),
                found: count,
            })
        }
    }
}

const CONSTANTS: &[(&str, f64)] = &[
    ("pi", consts::PI),
    ("PI", consts::PI),
    ("e", consts::E),
    ("E", consts::E),
    ("tau", consts::TAU),
    ("phi", 1.618_033_988_749_895),
];

pub(crate) fn constant(name: &str) -> Option<f64> {
    CONSTANTS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, value)| *value)
}

macro_rules! unary {
    ($name:literal, $f:expr) => {
        Function {
            name: $name,
            arity: Arity::Exactly(1),
            apply: |args| Ok($f(args[0])),
        }
    };
}

static FUNCTIONS: &[Function] = &[
    unary!("sqrt", f64::sqrt),
    unary!("cbrt", f64::cbrt),
    unary!("abs", f64::abs),
    unary!("exp", f64::exp),
    unary!("ln", f64::ln),
    unary!("log10", f64::log10),
    unary!("log2", f64::log2),
    unary!("sin", f64::sin),
    unary!("cos", f64::cos),
    unary!("tan", f64::tan),
    unary!("asin", f64::asin),
    unary!("acos", f64::acos),
    unary!("atan", f64::atan),
    unary!("sinh", f64::sinh),
    unary!("cosh", f64::cosh),
    unary!("tanh", f64::tanh),
    unary!("floor", f64::floor),
    unary!("ceil", f64::ceil),
    unary!("fix", f64::trunc),
    Function {
        name: "sign",
        arity: Arity::Exactly(1),
        apply: |args| Ok(sign(args[0])),
    },
    Function {
        name: "log",
        arity: Arity::Between(1, 2),
        apply: |args| match args {
            [x, base] => Ok(x.ln() / base.ln()),
            _ => Ok(args[0].ln()),
        },
    },
    Function {
        name: "round",
        arity: Arity::Between(1, 2),
        apply: |args| match args {
            [x, digits] => round_to(*x, *digits),
            _ => Ok(args[0].round()),
        },
    },
    Function {
        name: "pow",
        arity: Arity::Exactly(2),
        apply: |args| Ok(args[0].powf(args[1])),
    },
    Function {
        name: "atan2",
        arity: Arity::Exactly(2),
        apply: |args| Ok(args[0].atan2(args[1])),
    },
    Function {
        name: "mod",
        arity: Arity::Exactly(2),
        apply: |args| modulo(args[0], args[1]),
    },
    Function {
        name: "hypot",
        arity: Arity::AtLeast(1),
        apply: |args| Ok(args.iter().map(|v| v * v).sum::<f64>().sqrt()),
    },
    Function {
        name: "min",
        arity: Arity::AtLeast(1),
        apply: |args| Ok(args.iter().copied().fold(f64::INFINITY, f64::min)),
    },
    Function {
        name: "max",
        arity: Arity::AtLeast(1),
        apply: |args| Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
    },
    Function {
        name: "factorial",
        arity: Arity::Exactly(1),
        apply: |args| factorial(args[0]),
    },
];

pub(crate) fn function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

fn sign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

/// Floored modulo: the result takes the sign of the divisor.
pub(crate) fn modulo(x: f64, y: f64) -> Result<f64, EvalError> {
    if y == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(x - y * (x / y).floor())
}

pub(crate) const MAX_FACTORIAL: f64 = 170.0;

pub(crate) fn factorial(n: f64) -> Result<f64, EvalError> {
    if n < 0.0 || n.fract() != 0.0 || n > MAX_FACTORIAL {
        return Err(EvalError::Domain {
            function: "factorial".to_string(),
            value: super::Numeric::new(n).to_string(),
        });
    }
    // n is a small non-negative integer here
    let n = n as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}

fn round_to(x: f64, digits: f64) -> Result<f64, EvalError> {
    if digits.fract() != 0.0 || !(0.0..=15.0).contains(&digits) {
        return Err(EvalError::Domain {
            function: "round".to_string(),
            value: super::Numeric::new(digits).to_string(),
        });
    }
    let scale = 10f64.powf(digits);
    Ok((x * scale).round() / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_names() {
        assert!(function("sqrt").is_some());
        assert!(function("eval").is_none());
        assert_eq!(constant("pi"), Some(consts::PI));
        assert_eq!(constant("Pi"), None);
    }

    #[test]
    fn arity_is_enforced() {
        let pow = function("pow").unwrap();
        assert!(pow.check_arity(2).is_ok());
        let err = pow.check_arity(1).unwrap_err();
        assert_eq!(
            err,
            EvalError::Arity {
                name: "pow".into(),
                expected: "2".into(),
                found: 1
            }
        );
        assert!(function("max").unwrap().check_arity(5).is_ok());
        assert!(function("log").unwrap().check_arity(3).is_err());
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        assert_eq!(modulo(7.0, 3.0).unwrap(), 1.0);
        assert_eq!(modulo(-7.0, 3.0).unwrap(), 2.0);
        assert_eq!(modulo(7.0, 0.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn factorial_accepts_small_non_negative_integers() {
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert!(factorial(170.0).unwrap().is_finite());
        assert!(factorial(171.0).is_err());
        assert!(factorial(2.5).is_err());
        assert!(factorial(-1.0).is_err());
    }

    #[test]
    fn rounds_to_digits() {
        assert_eq!(round_to(1.23456, 2.0).unwrap(), 1.23);
        assert!(round_to(1.0, 1.5).is_err());
    }
}
