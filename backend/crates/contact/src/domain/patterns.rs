//! Detection Patterns
//!
//! Spam, SQL-injection and disposable-email rules kept as data: an ordered
//! list of labelled matchers. Policies can be extended without touching the
//! validator.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// How a rule recognises text
#[derive(Debug, Clone)]
pub enum Matcher {
    Regex(Regex),
    /// The same character repeated at least `min_run` times in a row
    /// (line breaks never count as part of a run)
    RepeatedChar {
        min_run: usize,
        case_insensitive: bool,
    },
}

impl Matcher {
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Regex(re) => re.is_match(text),
            Matcher::RepeatedChar {
                min_run,
                case_insensitive,
            } => has_repeated_run(text, *min_run, *case_insensitive),
        }
    }
}

fn has_repeated_run(text: &str, min_run: usize, case_insensitive: bool) -> bool {
    if min_run == 0 {
        return true;
    }
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        let c = if case_insensitive { fold_case(c) } else { c };
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            previous = None;
            run = 0;
            continue;
        }
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= min_run {
            return true;
        }
    }
    false
}

/// Single-character lowercase mapping; characters whose lowercase form
/// expands to several characters are kept as they are
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// A labelled matcher
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub label: Cow<'static, str>,
    pub matcher: Matcher,
}

impl PatternRule {
    /// Compile a regex rule
    pub fn regex(label: impl Into<Cow<'static, str>>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            label: label.into(),
            matcher: Matcher::Regex(Regex::new(pattern)?),
        })
    }

    pub fn repeated_char(
        label: impl Into<Cow<'static, str>>,
        min_run: usize,
        case_insensitive: bool,
    ) -> Self {
        Self {
            label: label.into(),
            matcher: Matcher::RepeatedChar {
                min_run,
                case_insensitive,
            },
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// Ordered rule list; the first matching rule wins
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    rules: Vec<PatternRule>,
}

impl PatternSet {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    pub fn first_match(&self, text: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|rule| rule.is_match(text))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// SQL keywords, comment tokens and `OR 1=1`-style tautologies
    pub fn sql_injection() -> Self {
        SQL_INJECTION.clone()
    }

    /// Spam keywords, chained URLs and long character runs
    pub fn spam() -> Self {
        SPAM.clone()
    }

    /// Disposable providers and multi-`+` local parts
    pub fn suspicious_email() -> Self {
        SUSPICIOUS_EMAIL.clone()
    }
}

fn builtin(label: &'static str, pattern: &str) -> PatternRule {
    PatternRule::regex(label, pattern).expect("built-in pattern must compile")
}

static SQL_INJECTION: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::new(vec![
        builtin(
            "sql-keyword",
            r"(?i)(?-u:\b)(SELECT|UNION|INSERT|UPDATE|DELETE|DROP)(?-u:\b)",
        ),
        builtin("sql-comment", r"(--|#|/\*|\*/)"),
        builtin(
            "sql-tautology",
            r"(?i)(?-u:\b)(OR|AND)\s+[0-9]+\s*=\s*[0-9]+",
        ),
    ])
});

static SPAM: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::new(vec![
        builtin(
            "spam-keyword",
            r"(?i)(?-u:\b)(viagra|cialis|pharmacy|casino|lottery|winner)(?-u:\b)",
        ),
        builtin(
            "spam-call-to-action",
            r"(?i)(?-u:\b)(click here|buy now|limited time|act now)(?-u:\b)",
        ),
        builtin("multiple-urls", r"(?i)(https?://){2,}"),
        PatternRule::repeated_char("repeated-characters", 11, true),
    ])
});

static SUSPICIOUS_EMAIL: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::new(vec![
        builtin(
            "disposable-provider",
            r"(?i)@(tempmail|guerrillamail|10minutemail|throwaway)",
        ),
        builtin("multiple-plus", r"\+.*\+"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_rules() {
        let set = PatternSet::sql_injection();
        assert_eq!(set.first_match("union all").unwrap().label, "sql-keyword");
        assert_eq!(set.first_match("a -- b").unwrap().label, "sql-comment");
        assert_eq!(set.first_match("x or 1 = 1").unwrap().label, "sql-tautology");
        assert!(!set.is_match("Selection of unions"));
    }

    #[test]
    fn test_spam_rules() {
        let set = PatternSet::spam();
        assert!(set.is_match("You are a WINNER"));
        assert!(set.is_match("please Click Here"));
        assert!(set.is_match("http://https://evil"));
        assert!(set.is_match("aaaaaaaaaaa"));
        assert!(!set.is_match("aaaaaaaaaa"));
        assert!(!set.is_match("one link https://example.com is fine"));
    }

    #[test]
    fn test_repeated_run_ignores_line_breaks() {
        let text = format!("{}\n{}", "a".repeat(6), "a".repeat(6));
        assert!(!has_repeated_run(&text, 11, true));
        assert!(has_repeated_run(&"\u{e7}".repeat(11), 11, false));
    }

    #[test]
    fn test_repeated_run_case_folding() {
        assert!(has_repeated_run("aAaAaAaAaAa", 11, true));
        assert!(!has_repeated_run("aAaAaAaAaAa", 11, false));
        assert!(has_repeated_run(&"\u{c7}\u{e7}".repeat(6), 11, true));

        let set = PatternSet::spam();
        assert_eq!(
            set.first_match("Hello there aAaAaAaAaAaA friend").unwrap().label,
            "repeated-characters"
        );
    }

    #[test]
    fn test_ascii_only_classes() {
        let sql = PatternSet::sql_injection();
        assert!(!sql.is_match("OR \u{661}=\u{661}"));
        assert!(sql.is_match("OR 1=1"));
        assert!(sql.is_match("\u{e9}SELECT"));

        let spam = PatternSet::spam();
        assert!(spam.is_match("a real winner."));
    }

    #[test]
    fn test_suspicious_email_rules() {
        let set = PatternSet::suspicious_email();
        assert!(set.is_match("x@TempMail.com"));
        assert!(set.is_match("a+b+c@example.com"));
        assert!(!set.is_match("a+b@example.com"));
    }

    #[test]
    fn test_custom_rule_extends_set() {
        let mut set = PatternSet::spam();
        let before = set.len();
        set.push(PatternRule::regex("crypto", r"(?i)\bcrypto\b").unwrap());
        assert_eq!(set.len(), before + 1);
        assert_eq!(set.first_match("free CRYPTO").unwrap().label, "crypto");
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        assert!(PatternRule::regex("broken", "(").is_err());
    }
}
