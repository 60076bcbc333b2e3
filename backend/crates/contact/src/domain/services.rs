//! Domain Services
//!
//! Pure checks used by the guard: sanitization, field format rules and the
//! honeypot.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::ContactForm;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script(?-u:\b).*?</script\s*>").expect("static regex"));
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));
static STRAY_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?script").expect("static regex"));
static JAVASCRIPT_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("static regex"));
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u:on[a-z0-9_]+)\s*=").expect("static regex"));

static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static regex")
});
static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("static regex"));

/// Strip executable constructs from untrusted text
///
/// Removes `<script>` elements with their content, any other markup tag,
/// unterminated `<script` openers, `javascript:` prefixes and inline
/// `on<event>=` handlers, then trims. Passes repeat until nothing changes,
/// so the result is idempotent and never contains `<script`.
pub fn sanitize(raw: &str) -> String {
    let mut current = sanitize_pass(raw);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(input: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(input, "");
    let text = MARKUP_TAG.replace_all(&text, "");
    let text = STRAY_SCRIPT.replace_all(&text, "");
    let text = JAVASCRIPT_URI.replace_all(&text, "");
    let text = EVENT_HANDLER.replace_all(&text, "");
    text.trim().to_string()
}

/// Conventional `local@domain.tld` shape within `max_len` characters
pub fn is_valid_email(email: &str, max_len: usize) -> bool {
    EMAIL_FORMAT.is_match(email) && email.chars().count() <= max_len
}

/// Letters, whitespace, hyphens and apostrophes only
pub fn has_valid_name_chars(name: &str) -> bool {
    NAME_CHARS.is_match(name)
}

/// `true` when the honeypot field is empty, i.e. a human filled the form
pub fn check_honeypot(form: &ContactForm) -> bool {
    form.honeypot().is_empty()
}
