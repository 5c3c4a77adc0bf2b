//! Configurable identifier character classes.
//!
//! A [`CharClass`] decides whether a character can start or continue an
//! identifier. The primary matcher covers the ASCII range; characters at
//! or above U+0080 are accepted unless a secondary matcher restricts them,
//! which lets grammars opt into strict Unicode identifier rules or fully
//! custom identifier alphabets.

use regex::Regex;
use unicode_xid::UnicodeXID;

/// A single-character test: either a builtin function or a user-supplied
/// regular expression matched against the one-char string.
#[derive(Debug, Clone)]
pub enum Matcher {
    Builtin(fn(char) -> bool),
    Pattern(Regex),
}

impl Matcher {
    pub fn test(&self, ch: char) -> bool {
        match self {
            Matcher::Builtin(f) => f(ch),
            Matcher::Pattern(re) => {
                let mut buf = [0u8; 4];
                re.is_match(ch.encode_utf8(&mut buf))
            }
        }
    }
}

/// Character class with an ASCII matcher and an optional matcher for
/// code points >= U+0080.
#[derive(Debug, Clone, Default)]
pub struct CharClass {
    /// Primary matcher. When `None`, only the high-range rule applies.
    pub re: Option<Matcher>,
    /// Secondary matcher for code points >= U+0080. When `None`, every
    /// such code point matches.
    pub re2: Option<Matcher>,
}

fn ascii_ident_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic()
}

fn ascii_ident_part(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphanumeric()
}

impl CharClass {
    /// Default identifier-start class: `[$_A-Za-z]` plus any non-ASCII
    /// character.
    pub fn ident_start() -> Self {
        Self {
            re: Some(Matcher::Builtin(ascii_ident_start)),
            re2: None,
        }
    }

    /// Default identifier-part class: `[$_0-9A-Za-z]` plus any non-ASCII
    /// character.
    pub fn ident_part() -> Self {
        Self {
            re: Some(Matcher::Builtin(ascii_ident_part)),
            re2: None,
        }
    }

    /// Strict Unicode identifier-start class (`XID_Start` plus `$`/`_`).
    pub fn xid_start() -> Self {
        Self {
            re: Some(Matcher::Builtin(ascii_ident_start)),
            re2: Some(Matcher::Builtin(UnicodeXID::is_xid_start)),
        }
    }

    /// Strict Unicode identifier-part class (`XID_Continue` plus `$`).
    pub fn xid_part() -> Self {
        Self {
            re: Some(Matcher::Builtin(ascii_ident_part)),
            re2: Some(Matcher::Builtin(UnicodeXID::is_xid_continue)),
        }
    }

    /// A class driven by a user-supplied pattern for the ASCII range.
    pub fn pattern(re: Regex) -> Self {
        Self {
            re: Some(Matcher::Pattern(re)),
            re2: None,
        }
    }

    /// Whether `ch` belongs to this class.
    pub fn test(&self, ch: char) -> bool {
        if let Some(re) = &self.re {
            if re.test(ch) {
                return true;
            }
        }
        (ch as u32) >= 0x80 && self.re2.as_ref().map_or(true, |re2| re2.test(ch))
    }

    /// Merge a rule-level override over a grammar-level default; each
    /// matcher slot overrides independently.
    pub fn overriding(&self, base: &CharClass) -> CharClass {
        CharClass {
            re: self.re.clone().or_else(|| base.re.clone()),
            re2: self.re2.clone().or_else(|| base.re2.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classes() {
        let start = CharClass::ident_start();
        assert!(start.test('a'));
        assert!(start.test('_'));
        assert!(start.test('$'));
        assert!(!start.test('1'));
        // any non-ASCII char is accepted by default
        assert!(start.test('é'));

        let part = CharClass::ident_part();
        assert!(part.test('1'));
        assert!(!part.test('-'));
    }

    #[test]
    fn test_xid_restricts_high_range() {
        let start = CharClass::xid_start();
        assert!(start.test('é'));
        // arrows are not XID_Start
        assert!(!start.test('→'));
    }

    #[test]
    fn test_pattern_class() {
        let class = CharClass::pattern(Regex::new(r"[A-Za-z\-]").unwrap());
        assert!(class.test('-'));
        assert!(!class.test('1'));
    }
}
