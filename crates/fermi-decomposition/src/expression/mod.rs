//! Restricted arithmetic over named variables.
//!
//! Numeric literals, identifiers, parentheses, unary minus and `+ - * /`.
//! Anything else (calls, exponentiation, comparison, attribute access) is a
//! parse error. There is no dynamic evaluation.

pub mod lexer;
pub mod parser;

use std::collections::BTreeMap;

use fermi_core::errors::ExpressionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Self::Number(_) => {}
            Self::Variable(name) => {
                if !out.iter().any(|v| v == name) {
                    out.push(name.clone());
                }
            }
            Self::Negate(inner) => inner.collect_variables(out),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
        }
    }

    fn eval(&self, values: &BTreeMap<String, f64>) -> Result<f64, ExpressionError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Variable(name) => {
                *values
                    .get(name)
                    .ok_or_else(|| ExpressionError::UnknownVariable { name: name.clone() })?
            }
            Self::Negate(inner) => -inner.eval(values)?,
            Self::Binary { op, lhs, rhs } => {
                let l = lhs.eval(values)?;
                let r = rhs.eval(values)?;
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => {
                        if r == 0.0 {
                            return Err(ExpressionError::DivisionByZero);
                        }
                        l / r
                    }
                }
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExpressionError::NonFinite)
        }
    }
}

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: Expr,
    variables: Vec<String>,
}

impl Expression {
    /// Parse a formula. An optional `target =` prefix is dropped.
    pub fn parse(formula: &str) -> Result<Self, ExpressionError> {
        let body = strip_target(formula);
        if body.trim().is_empty() {
            return Err(ExpressionError::Empty);
        }
        let tokens = lexer::tokenize(body)?;
        let root = parser::parse_tokens(&tokens)?;
        let mut variables = Vec::new();
        root.collect_variables(&mut variables);
        Ok(Self { root, variables })
    }

    /// Identifiers in order of first appearance.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn evaluate(&self, values: &BTreeMap<String, f64>) -> Result<f64, ExpressionError> {
        self.root.eval(values)
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }
}

/// Drop a leading `name =` when the left side is only words.
fn strip_target(formula: &str) -> &str {
    match formula.split_once('=') {
        Some((lhs, rhs))
            if !lhs.trim().is_empty()
                && lhs
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace()) =>
        {
            rhs
        }
        _ => formula,
    }
}
