//! Speculative branch rule.
//!
//! Attempts a named branch after snapshotting the cursor (position and
//! whitespace flags). Any parse error, no-match or hard, rolls the
//! snapshot back and declines, so the engine falls through to the next
//! alternative. Used to distinguish arrow parameter lists from
//! parenthesized expressions and destructuring targets from literals.

use jsexpr_ast::Node;
use jsexpr_diagnostics::ParseResult;

use crate::context::{Jump, ParserContext};
use crate::rules::Rule;

/// Rule attempting a sub-grammar with rollback on failure.
pub struct TryBranchRule {
    sub_rules: &'static str,
    /// Opening characters that must be present for the branch to be
    /// attempted at all (cheap pre-filter).
    test: Option<&'static str>,
}

impl TryBranchRule {
    pub fn new(sub_rules: &'static str) -> Self {
        Self {
            sub_rules,
            test: None,
        }
    }

    pub fn with_test(sub_rules: &'static str, test: &'static str) -> Self {
        Self {
            sub_rules,
            test: Some(test),
        }
    }
}

impl Rule for TryBranchRule {
    fn pre(&self, ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        if let Some(test) = self.test {
            match ctx.cursor.peek() {
                Some(ch) if test.contains(ch) => {}
                _ => return Ok(None),
            }
        }

        let state = ctx.cursor.snapshot();
        match ctx.parse_next(Jump::Label(self.sub_rules)) {
            Ok(node) => Ok(Some(node)),
            Err(_) => {
                ctx.cursor.restore(state);
                Ok(None)
            }
        }
    }
}
