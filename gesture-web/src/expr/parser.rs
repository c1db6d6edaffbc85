//! Recursive-descent parser producing an evaluable tree
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | ident | ident '(' args ')' | '(' expr ')'
//! ```
//!
//! `^` binds tighter than unary minus and is right-associative.

use super::lexer::{Token, TokenKind};
use crate::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    X,
    Y,
    K,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func1 {
    Sin, Cos, Tan, Asin, Acos, Atan, Sinh, Cosh, Tanh,
    Exp, Ln, Log10, Log2, Sqrt, Cbrt, Abs, Floor, Ceil, Round, Sign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func2 {
    Atan2,
    Pow,
    Min,
    Max,
    Hypot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Const(f64),
    Var(Var),
    Neg(Box<Node>),
    Binary(BinOp, Box<Node>, Box<Node>),
    Call1(Func1, Box<Node>),
    Call2(Func2, Box<Node>, Box<Node>),
}

fn lookup_func1(name: &str) -> Option<Func1> {
    Some(match name {
        "sin" => Func1::Sin,
        "cos" => Func1::Cos,
        "tan" => Func1::Tan,
        "asin" => Func1::Asin,
        "acos" => Func1::Acos,
        "atan" => Func1::Atan,
        "sinh" => Func1::Sinh,
        "cosh" => Func1::Cosh,
        "tanh" => Func1::Tanh,
        "exp" => Func1::Exp,
        "log" | "ln" => Func1::Ln,
        "log10" => Func1::Log10,
        "log2" => Func1::Log2,
        "sqrt" => Func1::Sqrt,
        "cbrt" => Func1::Cbrt,
        "abs" => Func1::Abs,
        "floor" => Func1::Floor,
        "ceil" => Func1::Ceil,
        "round" => Func1::Round,
        "sign" => Func1::Sign,
        _ => return None,
    })
}

fn lookup_func2(name: &str) -> Option<Func2> {
    Some(match name {
        "atan2" => Func2::Atan2,
        "pow" => Func2::Pow,
        "min" => Func2::Min,
        "max" => Func2::Max,
        "hypot" => Func2::Hypot,
        _ => return None,
    })
}

fn lookup_symbol(name: &str) -> Option<Node> {
    Some(match name {
        "x" => Node::Var(Var::X),
        "y" => Node::Var(Var::Y),
        "k" => Node::Var(Var::K),
        "pi" | "PI" => Node::Const(std::f64::consts::PI),
        "tau" => Node::Const(std::f64::consts::TAU),
        "e" | "E" => Node::Const(std::f64::consts::E),
        _ => return None,
    })
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the whole token stream; trailing tokens are an error
    pub fn parse(mut self) -> Result<Node, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let node = self.expr()?;
        match self.tokens.get(self.pos) {
            None => Ok(node),
            Some(tok) => Err(unexpected(tok)),
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn next(&mut self) -> Result<Token, ExprError> {
        let tok = self.tokens.get(self.pos).cloned().ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        let tok = self.next()?;
        if tok.kind == kind {
            Ok(())
        } else {
            Err(unexpected(&tok))
        }
    }

    fn expr(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                Some(TokenKind::Percent) => BinOp::Mod,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Node, ExprError> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                Ok(Node::Neg(Box::new(self.unary()?)))
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.primary()?;
        if self.peek() == Some(&TokenKind::Caret) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(Node::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let tok = self.next()?;
        match tok.kind {
            TokenKind::Number(value) => Ok(Node::Const(value)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                if self.peek() == Some(&TokenKind::LParen) {
                    self.pos += 1;
                    let args = self.args()?;
                    call(&name, args)
                } else {
                    lookup_symbol(&name).ok_or(ExprError::UnknownIdentifier(name))
                }
            }
            _ => Err(unexpected(&tok)),
        }
    }

    /// Comma-separated arguments; the opening paren is already consumed
    fn args(&mut self) -> Result<Vec<Node>, ExprError> {
        let mut args = Vec::new();
        if self.peek() == Some(&TokenKind::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            let tok = self.next()?;
            match tok.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => return Ok(args),
                _ => return Err(unexpected(&tok)),
            }
        }
    }
}

fn call(name: &str, args: Vec<Node>) -> Result<Node, ExprError> {
    let found = args.len();
    let arity = |expected: usize| ExprError::Arity {
        name: name.to_string(),
        expected,
        found,
    };

    if let Some(f) = lookup_func1(name) {
        let [arg]: [Node; 1] = args.try_into().map_err(|_| arity(1))?;
        return Ok(Node::Call1(f, Box::new(arg)));
    }
    if let Some(f) = lookup_func2(name) {
        let [a, b]: [Node; 2] = args.try_into().map_err(|_| arity(2))?;
        return Ok(Node::Call2(f, Box::new(a), Box::new(b)));
    }
    Err(ExprError::UnknownIdentifier(name.to_string()))
}

fn unexpected(tok: &Token) -> ExprError {
    ExprError::UnexpectedToken {
        found: tok.kind.describe(),
        pos: tok.pos,
    }
}
