//! jsexpr_eval: A tree-walking evaluator for jsexpr ASTs.
//!
//! [`Evaluator`] dispatches on the closed node kind and reproduces the
//! host language's evaluation order exactly: left-to-right operand
//! evaluation, short-circuiting logical/ternary/optional-chain forms,
//! single right-hand-side evaluation for assignments, and lazy defaults
//! in destructuring patterns. Every child evaluation re-enters
//! [`Evaluator::eval`] through a trait object, so a decorator can
//! intercept each step.
//!
//! The evaluator presets mirror the grammar presets: [`BasicEval`]
//! (operators and calls), [`ES5Eval`] (assignment, objects, `new`,
//! templates), [`ES6Eval`] (arrow functions).

pub mod eval;
pub mod exec;
pub mod ops;
pub mod pattern;
pub mod presets;
pub mod scope;
pub mod value;

pub use eval::Evaluator;
pub use jsexpr_diagnostics::{EvalError, EvalResult};
pub use presets::{BasicEval, ES5Eval, ES6Eval};
pub use scope::ScopeContext;
pub use value::{Callable, NativeFunction, Value};
