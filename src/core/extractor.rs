//! Turns a finished voice transcript into an amount and a display label.
//!
//! Matching is two-tiered: a number followed by a unit marker wins; if there
//! is none, the first standalone number is used. Anything without a numeric
//! token is not an entry.

use crate::core::vocabulary::{
    alternation, FALLBACK_LABEL, FILLER_PHRASES, LEADING_ARTICLES, UNIT_MARKERS,
};
use crate::domain::model::IntakeMatch;
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use std::sync::LazyLock;

const NUMBER: &str = r"[0-9]+(?:\.[0-9]+)?";

static AMOUNT_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({NUMBER})\s*{}\b", alternation(UNIT_MARKERS)))
        .expect("unit pattern is built from static vocabulary")
});

static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({NUMBER})\b")).expect("number pattern is static")
});

static FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{}\b", alternation(FILLER_PHRASES)))
        .expect("filler pattern is built from static vocabulary")
});

static LEADING_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{}\b\s*", alternation(LEADING_ARTICLES)))
        .expect("article pattern is built from static vocabulary")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is static"));

/// Extracts `{amount, label}` from a transcript, or `None` when the
/// transcript holds no usable number. Never panics on any input.
pub fn extract<'a>(transcript: impl Into<Option<&'a str>>) -> Option<IntakeMatch> {
    let original = transcript.into()?;
    let normalized = original.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let (number, span) = match AMOUNT_WITH_UNIT.captures(&normalized) {
        Some(caps) => {
            tracing::debug!("Matched amount with unit: {:?}", &caps[0]);
            (caps.get(1)?.as_str(), caps.get(0)?)
        }
        None => {
            let caps = BARE_NUMBER.captures(&normalized)?;
            tracing::debug!("No unit marker, using bare number: {:?}", &caps[0]);
            (caps.get(1)?.as_str(), caps.get(0)?)
        }
    };

    let amount: f64 = number.parse().ok()?;
    if !amount.is_finite() {
        tracing::warn!("Discarding non-finite amount from transcript");
        return None;
    }

    Some(IntakeMatch {
        amount,
        label: build_label(original.trim(), span.as_str(), span.range()),
    })
}

/// Rebuilds a readable label from the original-case transcript. `range`
/// locates `span` in the lowercased transcript.
fn build_label(original: &str, span: &str, range: Range<usize>) -> String {
    let without_amount = remove_span(original, span, range);

    let without_filler = FILLER.replace_all(&without_amount, "");
    let collapsed = WHITESPACE_RUN.replace_all(without_filler.trim(), " ");
    let trimmed = trim_non_alphanumeric(&collapsed);
    let without_article = LEADING_ARTICLE.replace(trimmed, "");

    capitalize_first(trim_non_alphanumeric(&without_article))
        .unwrap_or_else(|| FALLBACK_LABEL.to_string())
}

fn remove_span(original: &str, span: &str, range: Range<usize>) -> String {
    if let Some(found) = original.get(range.clone()) {
        if found.to_lowercase() == span {
            return format!("{}{}", &original[..range.start], &original[range.end..]);
        }
    }

    // 小寫化改變了位元組位置，退回移除第一個不分大小寫的出現處
    RegexBuilder::new(&regex::escape(span))
        .case_insensitive(true)
        .build()
        .map(|re| re.replacen(original, 1, "").into_owned())
        .unwrap_or_else(|_| original.to_string())
}

fn trim_non_alphanumeric(text: &str) -> &str {
    text.trim_matches(|c: char| !c.is_alphanumeric())
}

fn capitalize_first(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
