//! Personal info extractor: best-effort name / email / phone from extracted text.
//!
//! Pattern matching only. A line of digits misread as a phone number is an
//! accepted false positive; the heuristics are kept stable so results are reproducible.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Name:\s*([^\n]+)").expect("name pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern compiles")
    })
}

/// Optional `+` and country code, optional `(area)` group, then 3 and 4 digit blocks.
fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:\+?\d{1,4}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
            .expect("phone pattern compiles")
    })
}

/// Never fails: a field with no match is left empty.
pub fn extract_personal_info(text: &str) -> PersonalInfo {
    PersonalInfo {
        name: extract_name(text),
        email: first_match(email_pattern(), text),
        phone: first_match(phone_pattern(), text),
    }
}

fn extract_name(text: &str) -> String {
    if let Some(captures) = name_pattern().captures(text) {
        if let Some(rest) = captures.get(1) {
            return rest.as_str().trim().to_string();
        }
    }
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn first_match(pattern: &Regex, text: &str) -> String {
    pattern
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
