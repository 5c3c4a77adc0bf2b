//! Shared diagnostic message texts.
//!
//! Parse errors reuse these so tests and callers can match on stable
//! wording.

// ============================================================================
// Parse errors
// ============================================================================
pub const UNEXPECTED_CHAR: &str = "Unexpected character";
pub const NO_MATCHING_RULE: &str = "No matching rule";
pub const EXPRESSION_EXPECTED: &str = "Expression expected";
pub const CLOSING_CHAR_EXPECTED: &str = "Closing character expected";
pub const INVALID_LEFT_SIDE: &str = "Invalid left-hand side";
pub const UNCLOSED_QUOTE: &str = "Unclosed quote";
pub const INVALID_HEX_ESCAPE: &str = "Invalid hex escape sequence";
pub const INVALID_LINE_TERMINATOR: &str = "Invalid line terminator in string";
pub const UNTERMINATED_REGEX: &str = "Unterminated regular expression";
pub const INVALID_NUMBER: &str = "Invalid number format";
pub const EXPONENT_EXPECTED: &str = "Expected exponent";
pub const INVALID_RESERVED_IDENTIFIER: &str = "Invalid reserved identifier";
pub const UNARY_BEFORE_EXPONENTIATION: &str =
    "Unary operator used immediately before exponentiation expression";
pub const TAGGED_TEMPLATE_ON_CHAIN: &str = "Invalid tagged template on optional chain";
pub const REST_MUST_BE_LAST: &str = "Rest element must be last";
pub const UNKNOWN_BRANCH_LABEL: &str = "No registered grammar label";

// ============================================================================
// Evaluation errors
// ============================================================================
pub const UNSUPPORTED_EXPRESSION: &str = "Unsupported expression type";
pub const INVALID_ASSIGNMENT_TARGET: &str = "Invalid left side expression";
pub const NOT_A_FUNCTION: &str = "is not a function";
pub const NOT_A_CONSTRUCTOR: &str = "is not a constructor";
pub const IN_ON_NON_OBJECT: &str =
    "Cannot use 'in' operator to search in a non-object";
pub const SPREAD_NON_ITERABLE: &str = "Spread of a non-iterable value";
pub const DUPLICATE_PROPERTY: &str = "Duplicate property key";
pub const NULLISH_MEMBER_ACCESS: &str =
    "Cannot read properties of null or undefined";
