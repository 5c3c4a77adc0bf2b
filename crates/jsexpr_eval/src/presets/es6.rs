//! Evaluator for the ES6/ES-next dialects: ES5 plus arrow functions.
//!
//! Arrow evaluation produces a callable that, when invoked, binds its
//! parameters into a child scope delegating to the defining context.
//! Optional-chain short-circuiting needs no extra arms here: the shared
//! member/call implementations honor the parser-computed flags.

use jsexpr_ast::{Node, NodeKind};
use jsexpr_diagnostics::EvalResult;

use crate::eval::Evaluator;
use crate::exec;
use crate::presets::es5::es5_dispatch;
use crate::scope::ScopeContext;
use crate::value::Value;

/// Evaluator covering the ES6 and ES-next dialects.
#[derive(Debug, Default)]
pub struct ES6Eval;

impl ES6Eval {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for ES6Eval {
    fn eval_kind(&self, node: &Node, ctx: &ScopeContext) -> EvalResult<Value> {
        match &node.kind {
            NodeKind::ArrowFunctionExpression { params, body } => {
                Ok(exec::arrow(ctx, params, body))
            }
            _ => es5_dispatch(self, node, ctx),
        }
    }
}
