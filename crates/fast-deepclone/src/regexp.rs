//! RegExp objects
//!
//! Patterns are compiled with the `regex` crate. Syntax it does not support
//! (lookaround, backreferences) leaves the RegExp without a native matcher;
//! source and flags are still kept so the object can be inspected and copied.

use std::fmt;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::value::Value;

/// Flag characters in the order `RegExp.prototype.flags` reports them
const CANONICAL_FLAGS: &str = "dgimsuvy";

/// JavaScript RegExp object
#[derive(Debug)]
pub struct JsRegExp {
    /// The Ordinary Object part (properties like lastIndex)
    pub object: Arc<JsObject>,
    /// The regex pattern
    pattern: String,
    /// The regex flags, canonically ordered
    flags: String,
    /// The compiled Rust regex (if compilation succeeded)
    native_regex: Option<Regex>,
}

impl JsRegExp {
    /// Create a new JsRegExp
    pub fn new(pattern: &str, flags: &str, prototype: Option<Arc<JsObject>>) -> Self {
        let flags: String = CANONICAL_FLAGS
            .chars()
            .filter(|c| flags.contains(*c))
            .collect();
        let native_regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .ok();

        Self::with_parts(pattern.to_string(), flags, native_regex, prototype)
    }

    /// A fresh RegExp with the same source and flags, sharing the compiled
    /// matcher instead of rebuilding it. `lastIndex` starts at 0.
    pub fn duplicate(&self, prototype: Option<Arc<JsObject>>) -> Self {
        Self::with_parts(
            self.pattern.clone(),
            self.flags.clone(),
            self.native_regex.clone(),
            prototype,
        )
    }

    fn with_parts(
        pattern: String,
        flags: String,
        native_regex: Option<Regex>,
        prototype: Option<Arc<JsObject>>,
    ) -> Self {
        let object = Arc::new(JsObject::new(prototype));
        // lastIndex is the only own property; source/flags live on the prototype
        object.define_property(
            PropertyKey::string("lastIndex"),
            PropertyDescriptor::data_with_attrs(
                Value::number(0.0),
                PropertyAttributes {
                    writable: true,
                    enumerable: false,
                    configurable: false,
                },
            ),
        );

        Self {
            object,
            pattern,
            flags,
            native_regex,
        }
    }

    /// `source`
    pub fn source(&self) -> &str {
        &self.pattern
    }

    /// `flags`
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// `global`
    pub fn global(&self) -> bool {
        self.flags.contains('g')
    }

    /// `ignoreCase`
    pub fn ignore_case(&self) -> bool {
        self.flags.contains('i')
    }

    /// Whether the pattern compiled to a native matcher
    pub fn is_compiled(&self) -> bool {
        self.native_regex.is_some()
    }

    /// `test()` without lastIndex bookkeeping. `None` if the pattern did not compile.
    pub fn is_match(&self, haystack: &str) -> Option<bool> {
        self.native_regex.as_ref().map(|re| re.is_match(haystack))
    }
}

impl fmt::Display for JsRegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_canonicalized() {
        let re = JsRegExp::new("^foobar", "ig", None);
        assert_eq!(re.flags(), "gi");
        assert!(re.global());
        assert!(re.ignore_case());
        assert_eq!(re.to_string(), "/^foobar/gi");
    }

    #[test]
    fn test_matching() {
        let re = JsRegExp::new("^foo", "i", None);
        assert_eq!(re.is_match("FOObar"), Some(true));
        assert_eq!(re.is_match("barfoo"), Some(false));
    }

    #[test]
    fn test_unsupported_pattern_is_kept() {
        let re = JsRegExp::new("(?<=a)b", "", None);
        assert!(!re.is_compiled());
        assert_eq!(re.source(), "(?<=a)b");
        assert_eq!(re.is_match("ab"), None);
    }

    #[test]
    fn test_last_index_is_hidden() {
        let re = JsRegExp::new("x", "g", None);
        let desc = re.object.get_own_property(&"lastIndex".into()).unwrap();
        assert!(!desc.is_enumerable());
        assert_eq!(desc.value(), Some(&Value::number(0.0)));
    }

    #[test]
    fn test_duplicate_reuses_matcher() {
        let re = JsRegExp::new("^foo", "mi", None);
        re.object.set("lastIndex".into(), Value::number(3.0));

        let dup = re.duplicate(None);
        assert_eq!(dup.source(), "^foo");
        assert_eq!(dup.flags(), "im");
        assert_eq!(dup.is_match("FOO"), Some(true));
        assert_eq!(
            dup.object.get(&"lastIndex".into()),
            Some(Value::number(0.0))
        );

        let unsupported = JsRegExp::new("(?<=a)b", "", None).duplicate(None);
        assert!(!unsupported.is_compiled());
    }
}
