//! Math expressions for the equation surface
//!
//! A string is compiled once per equation change into a tree that is then
//! evaluated at every grid sample with `x`, `y` and `k` bound. Evaluation
//! does not allocate.

mod lexer;
mod parser;

use crate::error::{EvalError, ExprError};
use parser::{BinOp, Func1, Func2, Node, Parser, Var};

/// Variable values for one evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bindings {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

/// Something that can be evaluated at a sample point
pub trait Evaluable {
    fn eval(&self, bindings: &Bindings) -> Result<f64, EvalError>;
}

/// Turns source text into an `Evaluable`
pub trait ExpressionCompiler {
    type Compiled: Evaluable;

    fn compile(&self, source: &str) -> Result<Self::Compiled, ExprError>;
}

/// Compiler for the built-in expression grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct MathCompiler;

impl ExpressionCompiler for MathCompiler {
    type Compiled = CompiledExpr;

    fn compile(&self, source: &str) -> Result<CompiledExpr, ExprError> {
        let tokens = lexer::tokenize(source)?;
        let root = Parser::new(tokens).parse()?;
        Ok(CompiledExpr { root })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    root: Node,
}

impl Evaluable for CompiledExpr {
    fn eval(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        let value = eval_node(&self.root, bindings);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

/// Shorthand for `MathCompiler.compile(source)`
pub fn compile(source: &str) -> Result<CompiledExpr, ExprError> {
    MathCompiler.compile(source)
}

fn eval_node(node: &Node, b: &Bindings) -> f64 {
    match node {
        Node::Const(value) => *value,
        Node::Var(Var::X) => b.x,
        Node::Var(Var::Y) => b.y,
        Node::Var(Var::K) => b.k,
        Node::Neg(inner) => -eval_node(inner, b),
        Node::Binary(op, lhs, rhs) => {
            let l = eval_node(lhs, b);
            let r = eval_node(rhs, b);
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                // floored modulo: result takes the sign of the divisor
                BinOp::Mod => l - r * (l / r).floor(),
                BinOp::Pow => l.powf(r),
            }
        }
        Node::Call1(f, arg) => {
            let v = eval_node(arg, b);
            match f {
                Func1::Sin => v.sin(),
                Func1::Cos => v.cos(),
                Func1::Tan => v.tan(),
                Func1::Asin => v.asin(),
                Func1::Acos => v.acos(),
                Func1::Atan => v.atan(),
                Func1::Sinh => v.sinh(),
                Func1::Cosh => v.cosh(),
                Func1::Tanh => v.tanh(),
                Func1::Exp => v.exp(),
                Func1::Ln => v.ln(),
                Func1::Log10 => v.log10(),
                Func1::Log2 => v.log2(),
                Func1::Sqrt => v.sqrt(),
                Func1::Cbrt => v.cbrt(),
                Func1::Abs => v.abs(),
                Func1::Floor => v.floor(),
                Func1::Ceil => v.ceil(),
                Func1::Round => v.round(),
                Func1::Sign => {
                    if v == 0.0 {
                        0.0
                    } else {
                        v.signum()
                    }
                }
            }
        }
        Node::Call2(f, a, c) => {
            let a = eval_node(a, b);
            let c = eval_node(c, b);
            match f {
                Func2::Atan2 => a.atan2(c),
                Func2::Pow => a.powf(c),
                Func2::Min => a.min(c),
                Func2::Max => a.max(c),
                Func2::Hypot => a.hypot(c),
            }
        }
    }
}
