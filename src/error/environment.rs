//! Interpreter and environment errors

use super::impl_error_constructors;

impl_error_constructors!(
    InterpreterNotFound as interpreter_not_found(candidates),
);
