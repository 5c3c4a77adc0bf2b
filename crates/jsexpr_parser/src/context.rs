//! The per-parse context and the two-phase parsing engine.
//!
//! [`ParserContext`] owns the cursor state of one `parse()` call and
//! drives the grammar table: [`ParserContext::parse_next`] implements the
//! pre/post phase walk over one precedence chain,
//! [`ParserContext::parse_multi`] the shared `item (separator item)*`
//! primitive under comma sequences, argument lists, array/object elements
//! and statement bodies.

use indexmap::IndexMap;
use jsexpr_ast::Node;
use jsexpr_core::text::TextRange;
use jsexpr_diagnostics::{messages, ParseError, ParseResult};
use jsexpr_scanner::{Cursor, OperatorRegistry, Sep};

use crate::parser::ParserConfig;
use crate::rules::{MultiConf, Rule, Sparse};

/// Where to continue parsing relative to the current grammar position.
#[derive(Debug, Clone, Copy)]
pub enum Jump<'a> {
    /// Jump to level 0 of the named branch.
    Label(&'a str),
    /// Continue with the next (higher-precedence) level of the current
    /// branch.
    Next,
    /// Re-enter the current level (right-associative operands).
    Same,
}

/// One slot in a precedence chain: a rule, or an alias to another branch.
pub enum RuleSlot {
    Rule(Box<dyn Rule>),
    Alias(String),
}

impl RuleSlot {
    pub fn rule(rule: impl Rule + 'static) -> Self {
        RuleSlot::Rule(Box::new(rule))
    }

    pub fn alias(label: impl Into<String>) -> Self {
        RuleSlot::Alias(label.into())
    }
}

impl std::fmt::Debug for RuleSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSlot::Rule(_) => write!(f, "Rule(..)"),
            RuleSlot::Alias(label) => write!(f, "Alias({label})"),
        }
    }
}

/// A grammar table: named precedence branches, each an ordered chain of
/// rules from lowest precedence to highest (closest to the literals).
#[derive(Debug, Default)]
pub struct RuleSet {
    branches: IndexMap<String, Vec<RuleSlot>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a branch.
    pub fn insert(&mut self, label: impl Into<String>, slots: Vec<RuleSlot>) {
        self.branches.insert(label.into(), slots);
    }

    pub fn get(&self, label: &str) -> Option<&[RuleSlot]> {
        self.branches.get(label).map(Vec::as_slice)
    }

    /// Resolve a label to the map's own key (used to keep branch tracking
    /// allocation-free during parsing).
    fn key_of(&self, label: &str) -> Option<(&str, &[RuleSlot])> {
        self.branches
            .get_key_value(label)
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Insert a rule slot at `index` of an existing branch. Used by
    /// grammar extensions splicing new alternatives into a base table.
    pub fn insert_slot(&mut self, label: &str, index: usize, slot: RuleSlot) {
        let branch = self
            .branches
            .get_mut(label)
            .unwrap_or_else(|| panic!("unknown grammar branch: {label}"));
        branch.insert(index, slot);
    }

    /// Replace the slot at `index` of an existing branch.
    pub fn replace_slot(&mut self, label: &str, index: usize, slot: RuleSlot) {
        let branch = self
            .branches
            .get_mut(label)
            .unwrap_or_else(|| panic!("unknown grammar branch: {label}"));
        branch[index] = slot;
    }

    /// Replace the last slot of an existing branch.
    pub fn replace_last(&mut self, label: &str, slot: RuleSlot) {
        let branch = self
            .branches
            .get_mut(label)
            .unwrap_or_else(|| panic!("unknown grammar branch: {label}"));
        let last = branch.len() - 1;
        branch[last] = slot;
    }

    /// Fold every rule's registered operators, in table order.
    pub fn registered_operators(&self) -> Vec<(String, bool)> {
        let mut defs = Vec::new();
        for slots in self.branches.values() {
            for slot in slots {
                if let RuleSlot::Rule(rule) = slot {
                    defs.extend(rule.register());
                }
            }
        }
        defs
    }

    /// Validate that every alias and every label reachable from a slot
    /// resolves, so registration terminates before the first parse.
    pub fn check_aliases(&self) -> Result<(), String> {
        for (label, slots) in &self.branches {
            for slot in slots {
                if let RuleSlot::Alias(target) = slot {
                    if !self.branches.contains_key(target) {
                        return Err(format!(
                            "branch '{label}' aliases unknown branch '{target}'"
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Mutable state of a single `parse()` call.
pub struct ParserContext<'r> {
    pub cursor: Cursor,
    rules: &'r RuleSet,
    config: &'r ParserConfig,
    registry: &'r OperatorRegistry,
    branch: &'r str,
    level: usize,
}

impl<'r> ParserContext<'r> {
    pub fn new(
        expr: &str,
        rules: &'r RuleSet,
        config: &'r ParserConfig,
        registry: &'r OperatorRegistry,
    ) -> Self {
        Self {
            cursor: Cursor::new(expr),
            rules,
            config,
            registry,
            branch: "",
            level: 0,
        }
    }

    /// The parser-level configuration (identifier classes, range mode).
    #[inline]
    pub fn config(&self) -> &'r ParserConfig {
        self.config
    }

    /// The operator registry of the owning parser.
    #[inline]
    pub fn registry(&self) -> &'r OperatorRegistry {
        self.registry
    }

    /// A hard syntax error at the current position.
    pub fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.cursor.pos() as u32)
    }

    /// A no-match signal at the current position.
    pub fn err_no_match(&self, message: impl Into<String>) -> ParseError {
        ParseError::no_match(message, self.cursor.pos() as u32)
    }

    /// Skip whitespace, then consume the operator at the cursor if
    /// `accepts` allows it.
    pub fn take_operator(&mut self, accepts: impl Fn(&str) -> bool) -> Option<String> {
        self.cursor.take_operator(self.registry, accepts)
    }

    /// Resolve a jump to a concrete rule, following aliases.
    fn move_rule(&mut self, jump: Jump<'_>) -> ParseResult<&'r dyn Rule> {
        match jump {
            Jump::Label(label) => {
                let Some((key, _)) = self.rules.key_of(label) else {
                    return Err(self.err(format!(
                        "{}: {label}",
                        messages::UNKNOWN_BRANCH_LABEL
                    )));
                };
                self.branch = key;
                self.level = 0;
            }
            Jump::Next => self.level += 1,
            Jump::Same => {}
        }

        let slots = self
            .rules
            .get(self.branch)
            .ok_or_else(|| self.err(messages::UNKNOWN_BRANCH_LABEL))?;

        if self.level >= slots.len() {
            return Err(self.err_no_match(messages::NO_MATCHING_RULE));
        }

        match &slots[self.level] {
            RuleSlot::Rule(rule) => Ok(rule.as_ref()),
            RuleSlot::Alias(label) => {
                // clone-free: re-resolve through the map's own key
                let target: &'r str = match self.rules.key_of(label) {
                    Some((key, _)) => key,
                    None => {
                        return Err(self.err(format!(
                            "{}: {label}",
                            messages::UNKNOWN_BRANCH_LABEL
                        )))
                    }
                };
                self.move_rule(Jump::Label(target))
            }
        }
    }

    /// Parse one expression starting from `jump`.
    ///
    /// Pre phase: try the rule's `pre` hook; on decline, recurse into the
    /// next level until some rule produces a node (the last level failing
    /// raises a no-match error). Post phase: give the rule's `post` hook a
    /// chance to extend the bubbled node. Branch/level are restored on
    /// exit, also when an error unwinds.
    pub fn parse_next(&mut self, jump: Jump<'_>) -> ParseResult<Node> {
        let saved_branch = self.branch;
        let saved_level = self.level;
        let start = self.cursor.pos();

        let result = self.parse_next_inner(jump, start);

        self.branch = saved_branch;
        self.level = saved_level;
        result
    }

    fn parse_next_inner(&mut self, jump: Jump<'_>, start: usize) -> ParseResult<Node> {
        let rule = self.move_rule(jump)?;

        let node = match rule.pre(self)? {
            Some(node) => node,
            None => self.parse_next(Jump::Next)?,
        };
        self.cursor.skip_spaces();
        let mut node = rule.post(self, node)?;

        if self.config.range && node.range.is_none() {
            node.range = Some(TextRange::new(
                start as u32,
                self.cursor.consumed_end() as u32,
            ));
        }
        Ok(node)
    }

    /// Parse `item (separator item)*` under the policy of `conf`.
    ///
    /// Returns the elements (`None` marks a sparse hole) and the match
    /// flag: whether the caller's wrapping rule should fire (a separator
    /// was seen, or wrapper mode got its single expression).
    pub fn parse_multi(
        &mut self,
        conf: &MultiConf,
        jump: Jump<'_>,
    ) -> ParseResult<(Vec<Option<Node>>, bool)> {
        let mut nodes: Vec<Option<Node>> = Vec::new();
        let max_sep = if conf.separators.is_empty() {
            0
        } else {
            conf.max_sep.unwrap_or(usize::MAX)
        };
        let mut sep;
        let mut index = 0usize;

        loop {
            self.cursor.skip_spaces();
            let item_start = self.cursor.pos();

            match self.parse_next(jump) {
                Ok(node) => {
                    sep = self.cursor.try_separator(&conf.separators);
                    if let Some(accepts) = conf.types {
                        if !accepts(&node) {
                            return Err(self.err(format!(
                                "Invalid argument type: {}",
                                node.type_name()
                            )));
                        }
                    }
                    nodes.push(Some(node));
                }
                Err(e) if e.no_match => {
                    // no expression found at this slot
                    sep = self.cursor.try_separator(&conf.separators);
                    match sep {
                        Sep::None | Sep::Implicit => {
                            // empty last expression
                            if !conf.trailing && index > 0 {
                                return Err(self.err(messages::EXPRESSION_EXPECTED));
                            }
                            if index > 0 {
                                sep = Sep::Implicit;
                            }
                            break;
                        }
                        Sep::Char(_) => match &conf.sparse {
                            Sparse::No => {
                                return Err(self.err(messages::EXPRESSION_EXPECTED))
                            }
                            Sparse::Hole => nodes.push(None),
                            Sparse::Filler(make) => {
                                let mut filler = Node::new(make());
                                if self.config.range {
                                    let end = if self.cursor.eof() && !self.cursor.saw_newline()
                                    {
                                        self.cursor.consumed_end()
                                    } else {
                                        self.cursor.pos()
                                    };
                                    filler.range = Some(TextRange::new(
                                        item_start as u32,
                                        end as u32,
                                    ));
                                }
                                nodes.push(Some(filler));
                            }
                        },
                    }
                }
                Err(e) => return Err(e),
            }

            index += 1;
            if !sep.matched() || self.cursor.eof() || index > max_sep {
                break;
            }
        }

        if sep.matched() && self.cursor.eof() && !conf.trailing {
            return Err(self.err(messages::EXPRESSION_EXPECTED));
        }

        let matched = (sep.matched() && nodes.is_empty())
            || (nodes.len() == 1 && (sep.matched() || conf.separators.is_empty()))
            || nodes.len() > 1;
        Ok((nodes, matched))
    }
}
