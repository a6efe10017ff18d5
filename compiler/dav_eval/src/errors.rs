//! Evaluation errors.
//!
//! Every failure the interpreter can hit is an [`EvalError`] carrying a
//! structured [`EvalErrorKind`]. Factory functions such as
//! [`division_by_zero`] are the public way to build one.
//!
//! Almost all failures are soft: the interpreter records a diagnostic, uses
//! `None` for the failed value and keeps going. Only [`EvalErrorKind::RecursionLimit`]
//! ends a run.

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Type/Operator
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("operator `{op}` cannot be applied to {type_name}")]
    InvalidBinaryOp { type_name: String, op: String },
    #[error("operator `{op}` cannot be applied to `{left}` and `{right}`")]
    BinaryTypeMismatch {
        op: String,
        left: String,
        right: String,
    },

    // Access
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },
    #[error("module `{name}` is not imported")]
    UndefinedModule { name: String },
    #[error("module `{module}` has no member `{member}`")]
    UndefinedModuleMember { module: String, member: String },
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("key not found: {key}")]
    KeyNotFound { key: String },
    #[error("{type_name} cannot be indexed")]
    NotIndexable { type_name: String },
    #[error("`{name}` is not a list")]
    NotAList { name: String },

    // Function
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },
    #[error("{function}: {message}")]
    InvalidArgument { function: String, message: String },
    #[error("maximum call depth of {depth} exceeded")]
    RecursionLimit { depth: usize },

    // Syntax
    #[error("cannot read expression: {message}")]
    Syntax { message: String },

    // Input
    #[error("no input available for {name}")]
    InputUnavailable { name: String },
}

/// An evaluation failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
}

impl EvalError {
    /// Build an error whose message is the kind's display text.
    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }

    /// Whether this failure ends the run instead of being reported and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, EvalErrorKind::RecursionLimit { .. })
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Factory functions

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    })
}

#[cold]
pub fn invalid_unary_op(op: &str, operand: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        type_name: operand.type_name().to_string(),
        op: op.to_string(),
    })
}

#[cold]
pub fn binary_type_mismatch(op: &str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op: op.to_string(),
        left: left.type_name().to_string(),
        right: right.type_name().to_string(),
    })
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_module(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedModule {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_module_member(module: &str, member: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedModuleMember {
        module: module.to_string(),
        member: member.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

#[cold]
pub fn not_indexable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable {
        type_name: value.type_name().to_string(),
    })
}

#[cold]
pub fn not_a_list(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAList {
        name: name.to_string(),
    })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: &str, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got,
    })
}

#[cold]
pub fn invalid_argument(function: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        function: function.to_string(),
        message: message.into(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

#[cold]
pub fn syntax_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Syntax {
        message: message.into(),
    })
}

#[cold]
pub fn input_unavailable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InputUnavailable {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_matches_kind() {
        assert_eq!(division_by_zero().message, "division by zero");
        assert_eq!(integer_overflow("*").to_string(), "integer overflow in *");
        assert_eq!(
            wrong_arg_count("sqrt", "1", 2).to_string(),
            "sqrt expects 1 argument(s), got 2"
        );
        assert_eq!(
            binary_type_mismatch("+", &Value::Int(1), &Value::text("a")).to_string(),
            "operator `+` cannot be applied to `int` and `text`"
        );
    }

    #[test]
    fn only_recursion_limit_is_fatal() {
        assert!(recursion_limit_exceeded(1000).is_fatal());
        assert!(!division_by_zero().is_fatal());
        assert!(!undefined_variable("x").is_fatal());
        assert!(!input_unavailable("n").is_fatal());
    }
}
