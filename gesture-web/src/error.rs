//! Error types shared by the core modules and the JS bridge

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while compiling a math expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number at {0}")]
    BadNumber(usize),

    #[error("unexpected token '{found}' at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("function '{name}' takes {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("empty expression")]
    Empty,
}

/// Failures while evaluating a compiled expression
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvalError {
    #[error("expression produced a non-finite value")]
    NonFinite,
}

/// Failures while normalizing an imported model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model bounds are not finite")]
    NonFiniteBounds,

    #[error("model bounds have zero extent")]
    DegenerateBounds,

    #[error("no model has been imported")]
    NoModel,
}

/// Malformed detector input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    #[error("hand {hand}: expected {expected} floats, buffer holds {found}")]
    ShortBuffer {
        hand: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown handedness label '{0}'")]
    UnknownHandedness(String),
}

/// Use of the session after it was torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("session has been torn down")]
    TornDown,
}

/// Umbrella error returned across the JS boundary
#[derive(Debug, Error)]
pub enum VizError {
    #[error("expression error: {0}")]
    Expr(#[from] ExprError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("landmark error: {0}")]
    Landmark(#[from] LandmarkError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid configuration: {field} {reason}")]
    ConfigRange {
        field: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("unknown preset index {0}")]
    UnknownPreset(usize),

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

impl From<VizError> for JsValue {
    fn from(err: VizError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
