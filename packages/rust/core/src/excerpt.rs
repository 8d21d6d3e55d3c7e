//! Excerpt extraction under a scoped "current record".
//!
//! Excerpt lookup reads the current record from a [`RecordContext`] owned by
//! the caller. [`RecordContext::enter`] swaps the record in and the returned
//! [`RecordScope`] puts the previous one back when dropped, on every exit path.

use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use schemald_shared::Record;

/// Number of words kept by an automatic excerpt.
pub const EXCERPT_WORDS: usize = 55;

/// Suffix appended when an automatic excerpt is truncated.
pub const EXCERPT_MORE: &str = " [&hellip;]";

// ---------------------------------------------------------------------------
// Record context
// ---------------------------------------------------------------------------

/// Holds the record that excerpt lookups treat as current.
#[derive(Debug, Clone, Default)]
pub struct RecordContext {
    current: Option<Record>,
}

impl RecordContext {
    /// A context with no current record.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose current record is already set.
    pub fn with_current(record: Record) -> Self {
        Self {
            current: Some(record),
        }
    }

    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    /// Make `record` current until the returned scope is dropped.
    pub fn enter(&mut self, record: &Record) -> RecordScope<'_> {
        let previous = self.current.replace(record.clone());
        RecordScope {
            context: self,
            previous,
        }
    }
}

/// Restores the previously current record (or its absence) on drop.
#[must_use = "the record is only current while the scope is alive"]
pub struct RecordScope<'a> {
    context: &'a mut RecordContext,
    previous: Option<Record>,
}

impl Deref for RecordScope<'_> {
    type Target = RecordContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl Drop for RecordScope<'_> {
    fn drop(&mut self) {
        self.context.current = self.previous.take();
    }
}

// ---------------------------------------------------------------------------
// Excerpts
// ---------------------------------------------------------------------------

/// Plain-text, entity-decoded excerpt for `record`.
///
/// `record` is current in `context` only for the duration of the lookup.
pub fn excerpt(context: &mut RecordContext, record: &Record) -> String {
    let raw = {
        let scope = context.enter(record);
        scope.current().map(raw_excerpt).unwrap_or_default()
    };

    decode_entities(&raw)
}

/// The excerpt before decoding: the manual excerpt if set, else a trimmed body.
fn raw_excerpt(record: &Record) -> String {
    match record.excerpt.as_deref() {
        Some(manual) if !manual.trim().is_empty() => manual.to_string(),
        _ => trim_words(&strip_tags(&record.body), EXCERPT_WORDS, EXCERPT_MORE),
    }
}

/// Remove `<script>`/`<style>` blocks and all remaining tags.
///
/// Block-level tags become a space so paragraphs don't run together; inline
/// tags vanish so `<b>W</b>ord` stays one word.
fn strip_tags(html: &str) -> String {
    static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>").expect("valid regex")
    });
    static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"(?i)</?(?:p|div|br|hr|li|ul|ol|dl|dt|dd|h[1-6]|blockquote|pre|table|tr|td|th|section|article|header|footer|figure|figcaption)\b[^>]*>",
        )
        .expect("valid regex")
    });
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

    let text = SCRIPT_RE.replace_all(html, "");
    let text = BLOCK_TAG_RE.replace_all(&text, " ");
    TAG_RE.replace_all(&text, "").into_owned()
}

/// Keep the first `limit` whitespace-separated words, appending `more` if cut.
fn trim_words(text: &str, limit: usize, more: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > limit {
        format!("{}{more}", words[..limit].join(" "))
    } else {
        words.join(" ")
    }
}

/// Decode HTML entities (and drop any stray markup) using the HTML parser.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') && !text.contains('<') {
        return text.to_string();
    }

    Html::parse_fragment(text)
        .root_element()
        .text()
        .collect::<String>()
}
