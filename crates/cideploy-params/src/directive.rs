//! Parsing of `$[cd_*]` directives embedded in parameter values.
//!
//! Parsing is separate from evaluation: [`Directive::parse`] only
//! classifies the text, and the resolver decides what each variant yields.

use std::sync::LazyLock;

use regex::Regex;

/// Use the template's declared default.
pub const DEFAULT_TOKEN: &str = "$[cd_default]";
/// Use the value from the override table.
pub const OVERRIDE_TOKEN: &str = "$[cd_overridden]";
/// Random alphanumeric string, e.g. `$[cd_randchar12]`.
pub const RANDCHAR_PREFIX: &str = "$[cd_randchar";
/// Comma-joined availability zones, e.g. `$[cd_genaz2]`.
pub const GENAZ_PREFIX: &str = "$[cd_genaz";
/// Generated password, e.g. `$[cd_genpass16]` or `$[cd_genpass_strong16]`.
pub const GENPASS_PREFIX: &str = "$[cd_genpass";

const STRONG_MODIFIER: &str = "_strong";

#[allow(clippy::expect_used)]
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("number pattern is valid"));

/// What a parameter's raw value asks the resolver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Take the template schema's `Default`.
    UseTemplateDefault,
    /// Take the override table's value for the same key.
    UseOverride,
    /// Generate a random alphanumeric string.
    RandomChars {
        /// Number of characters.
        length: usize,
    },
    /// Pick distinct availability zones.
    GenerateAzs {
        /// Number of zones.
        count: usize,
    },
    /// Generate a password.
    GeneratePassword {
        /// Number of characters.
        length: usize,
        /// Whether to mix in symbols.
        strong: bool,
    },
    /// Pass the raw value through unchanged.
    Literal,
}

impl Directive {
    /// Classifies a raw parameter value.
    ///
    /// Matching is done on the trimmed text, in order: default, override,
    /// randchar, genaz, genpass. A generator directive without a usable
    /// number is treated as a literal.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();

        if text == DEFAULT_TOKEN {
            return Self::UseTemplateDefault;
        }
        if text == OVERRIDE_TOKEN {
            return Self::UseOverride;
        }
        if let Some(rest) = text.strip_prefix(RANDCHAR_PREFIX) {
            return first_number(rest).map_or(Self::Literal, |length| Self::RandomChars { length });
        }
        if let Some(rest) = text.strip_prefix(GENAZ_PREFIX) {
            return first_number(rest).map_or(Self::Literal, |count| Self::GenerateAzs { count });
        }
        if let Some(rest) = text.strip_prefix(GENPASS_PREFIX) {
            let (strong, rest) = rest
                .strip_prefix(STRONG_MODIFIER)
                .map_or((false, rest), |r| (true, r));
            return first_number(rest)
                .map_or(Self::Literal, |length| Self::GeneratePassword { length, strong });
        }
        Self::Literal
    }

    /// Returns whether evaluating this directive produces random output.
    #[must_use]
    pub const fn is_generated(self) -> bool {
        matches!(
            self,
            Self::RandomChars { .. } | Self::GenerateAzs { .. } | Self::GeneratePassword { .. }
        )
    }
}

/// First run of ASCII digits before the closing `]`, if it fits in a `usize`.
fn first_number(text: &str) -> Option<usize> {
    let inner = text.split_once(']').map_or(text, |(inner, _)| inner);
    NUMBER.find(inner).and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact_tokens() {
        assert_eq!(Directive::parse("$[cd_default]"), Directive::UseTemplateDefault);
        assert_eq!(Directive::parse("$[cd_overridden]"), Directive::UseOverride);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        assert_eq!(Directive::parse("  $[cd_default]\n"), Directive::UseTemplateDefault);
        assert_eq!(
            Directive::parse(" $[cd_randchar5] "),
            Directive::RandomChars { length: 5 }
        );
    }

    #[test]
    fn exact_tokens_reject_trailing_text() {
        assert_eq!(Directive::parse("$[cd_default]x"), Directive::Literal);
        assert_eq!(Directive::parse("$[cd_overridden"), Directive::Literal);
    }

    #[test]
    fn digits_after_closing_bracket_are_ignored() {
        assert_eq!(Directive::parse("$[cd_randchar]5"), Directive::Literal);
        assert_eq!(Directive::parse("$[cd_genaz]2"), Directive::Literal);
        assert_eq!(Directive::parse("$[cd_genpass_strong]8"), Directive::Literal);
        assert_eq!(Directive::parse("$[cd_genpass]16"), Directive::Literal);
    }

    #[test]
    fn parse_randchar() {
        assert_eq!(
            Directive::parse("$[cd_randchar16]"),
            Directive::RandomChars { length: 16 }
        );
        assert_eq!(
            Directive::parse("$[cd_randchar0]"),
            Directive::RandomChars { length: 0 }
        );
    }

    #[test]
    fn parse_genaz() {
        assert_eq!(Directive::parse("$[cd_genaz2]"), Directive::GenerateAzs { count: 2 });
    }

    #[test]
    fn parse_genpass_plain_and_strong() {
        assert_eq!(
            Directive::parse("$[cd_genpass12]"),
            Directive::GeneratePassword {
                length: 12,
                strong: false
            }
        );
        assert_eq!(
            Directive::parse("$[cd_genpass_strong8]"),
            Directive::GeneratePassword {
                length: 8,
                strong: true
            }
        );
    }

    #[test]
    fn first_digit_run_is_used() {
        assert_eq!(
            Directive::parse("$[cd_randchar12x34]"),
            Directive::RandomChars { length: 12 }
        );
    }

    #[test]
    fn generator_without_digits_is_literal() {
        assert_eq!(Directive::parse("$[cd_randchar]"), Directive::Literal);
        assert_eq!(Directive::parse("$[cd_genaz]"), Directive::Literal);
        assert_eq!(Directive::parse("$[cd_genpass_strong]"), Directive::Literal);
    }

    #[test]
    fn oversized_number_is_literal() {
        assert_eq!(
            Directive::parse("$[cd_randchar99999999999999999999999999]"),
            Directive::Literal
        );
    }

    #[test]
    fn plain_values_are_literal() {
        for raw in ["c5.large", "", "$[cd_unknown]", "cd_default", "10.0.0.0/16"] {
            assert_eq!(Directive::parse(raw), Directive::Literal, "raw = {raw:?}");
        }
    }

    #[test]
    fn is_generated_only_for_generators() {
        assert!(Directive::RandomChars { length: 1 }.is_generated());
        assert!(Directive::GenerateAzs { count: 1 }.is_generated());
        assert!(!Directive::UseOverride.is_generated());
        assert!(!Directive::Literal.is_generated());
    }
}
