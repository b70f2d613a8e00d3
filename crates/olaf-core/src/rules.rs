//! Rule-based intent parser: the fast path of the pipeline.
//!
//! Pattern-matches free text into an intent plus extracted fields and a
//! confidence score. Pure and total — no I/O, and unmatched input yields
//! an unknown result instead of an error. Matching is case-insensitive
//! with flexible whitespace, but extracted slots keep the user's original
//! casing.
//!
//! Add templates are ordered from most- to least-specific and the first
//! match wins, so a fully-qualified phrase is never mis-parsed by a looser
//! pattern. Confidence reflects how many of the three slots (quantity,
//! food, location) a template fills; the exact values are heuristic policy
//! and the dispatcher treats its acceptance threshold as configurable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ParseResult, ParseSource};

/// Confidence assigned to a recognized inventory question.
pub const QUERY_CONFIDENCE: f32 = 0.9;

/// Leading quantity token: number with optional `.`/`,` decimal part and
/// optional unit word.
const QTY: &str = r"\d+(?:[.,]\d+)?(?:\s*\p{L}+)?";

/// Food slot: starts with a letter, shortest match that satisfies the
/// rest of the template.
const FOOD: &str = r"\p{L}.*?";

/// Location slot: letters/digits/spaces/dashes, trailing punctuation left
/// outside the capture.
const LOC: &str = r"\p{L}[\p{L}\d -]*?";

const ARROW: &str = r"(?:->|=>|→)";
const PREP: &str = r"(?:u|na|za|in|into|at|to)";
const TAIL: &str = r"[\s.!?]*$";

/// Inventory-question detection ("what do I have" / "show me").
static QUERY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:[šs]to\s+(?:sve\s+)?imam|popis|stanje|inventar|inventory|what\s+do\s+i\s+have|what'?s\s+in|show\s+me)\b",
    )
    .expect("query pattern must compile")
});

/// Optional leading verb ("dodaj 2 mlijeka u hladnjak"), stripped before
/// template matching.
static VERB_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:dodaj|dodao\s+sam|dodala\s+sam|stavi|stavio\s+sam|stavila\s+sam|spremi|kupio\s+sam|kupila\s+sam|imam|add|put|store)\s+",
    )
    .expect("verb prefix pattern must compile")
});

struct AddTemplate {
    /// Slot coverage this template guarantees, as a confidence score.
    confidence: f32,
    re: Regex,
}

/// Add-phrase templates, most specific first.
static ADD_TEMPLATES: Lazy<Vec<AddTemplate>> = Lazy::new(|| {
    let template = |confidence: f32, pattern: String| AddTemplate {
        confidence,
        re: Regex::new(&pattern).expect("add template must compile"),
    };
    vec![
        // "<qty> <food> u/na <location>"  — full triple
        template(
            0.9,
            format!(r"(?i)^(?P<qty>{QTY})\s+(?P<food>{FOOD})\s+{PREP}\s+(?P<loc>{LOC}){TAIL}"),
        ),
        // "<qty> <food> -> <location>"    — full triple
        template(
            0.9,
            format!(r"(?i)^(?P<qty>{QTY})\s+(?P<food>{FOOD})\s*{ARROW}\s*(?P<loc>{LOC}){TAIL}"),
        ),
        // "<food> <qty> -> <location>"    — full triple, inverted order
        template(
            0.9,
            format!(r"(?i)^(?P<food>{FOOD})\s+(?P<qty>{QTY})\s*{ARROW}\s*(?P<loc>{LOC}){TAIL}"),
        ),
        // "<food> u <location>"           — no quantity
        template(
            0.8,
            format!(r"(?i)^(?P<food>{FOOD})\s+{PREP}\s+(?P<loc>{LOC}){TAIL}"),
        ),
        // "<qty> <food>"                  — no location; below threshold
        template(0.5, format!(r"(?i)^(?P<qty>{QTY})\s+(?P<food>\p{{L}}.*?){TAIL}")),
    ]
});

/// Parse one message into intent + fields + confidence.
pub fn parse(text: &str) -> ParseResult {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParseResult::unknown(ParseSource::Rules);
    }

    // Query detection short-circuits every add template.
    if QUERY_RE.is_match(trimmed) {
        return ParseResult::query(QUERY_CONFIDENCE, ParseSource::Rules);
    }

    let body = strip_leading_verb(trimmed);

    for template in ADD_TEMPLATES.iter() {
        if let Some(caps) = template.re.captures(body) {
            let food = clean_slot(caps.name("food").map(|m| m.as_str()));
            if food.is_none() {
                continue;
            }
            let quantity_text = clean_slot(caps.name("qty").map(|m| m.as_str()));
            let location = clean_slot(caps.name("loc").map(|m| m.as_str()));
            return ParseResult::add(
                food,
                quantity_text,
                location,
                template.confidence,
                ParseSource::Rules,
            );
        }
    }

    ParseResult::unknown(ParseSource::Rules)
}

fn strip_leading_verb(text: &str) -> &str {
    match VERB_PREFIX_RE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

fn clean_slot(slot: Option<&str>) -> Option<String> {
    let cleaned = slot?
        .trim()
        .trim_end_matches(['.', ',', '!', '?', ';', ':'])
        .trim_end();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
