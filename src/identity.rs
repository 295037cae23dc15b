//! Model identity resolution
//!
//! Turns an arbitrary, inconsistently formatted file-derived model name into
//! a structured identity: organization, display name, family, parameter count
//! and instruction-tuned flag. Resolution is a total function; names that
//! match no known convention fall back to best-effort defaults rather than
//! failing the pipeline, because the dataset is known to contain atypical
//! names.
//!
//! The heuristics are ordered rule tables, evaluated in priority order, so
//! new organizations or families can be added without touching control flow.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse model lineage inferred from naming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    Llama,
    Qwen,
    Mistral,
    Gemma,
    Phi,
    Yi,
    Falcon,
    DeepSeek,
    Unknown,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Llama => "Llama",
            Family::Qwen => "Qwen",
            Family::Mistral => "Mistral",
            Family::Gemma => "Gemma",
            Family::Phi => "Phi",
            Family::Yi => "Yi",
            Family::Falcon => "Falcon",
            Family::DeepSeek => "DeepSeek",
            Family::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Resolved identity for one model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelIdentity {
    pub organization: String,
    pub display_name: String,
    pub family: Family,
    /// Parameter count such as "7B", or "Unknown"
    pub parameter_size: String,
    pub is_instruct: bool,
}

impl ModelIdentity {
    /// Composed identifier: `<organization>/<display_name>`
    pub fn id(&self) -> String {
        format!("{}/{}", self.organization, self.display_name)
    }
}

/// Organization keyword table for names without an underscore separator.
/// Scanned case-insensitively in order; first match wins.
const ORG_KEYWORDS: &[(&str, &str)] = &[
    ("meta-llama", "Meta Llama"),
    ("qwen", "Qwen"),
    ("mistral", "Mistral"),
    ("01-ai", "01-ai"),
    ("google", "Google"),
    ("microsoft", "Microsoft"),
];

/// Organization used when no keyword matches
const ORG_PLACEHOLDER: &str = "Others";

/// Family keyword table, tested against the lowered composed id in order
const FAMILY_KEYWORDS: &[(&str, Family)] = &[
    ("llama", Family::Llama),
    ("qwen", Family::Qwen),
    ("mistral", Family::Mistral),
    ("gemma", Family::Gemma),
    ("phi", Family::Phi),
    ("yi", Family::Yi),
    ("falcon", Family::Falcon),
    ("deepseek", Family::DeepSeek),
];

/// A numeric token immediately followed by `b`/`B`, e.g. "8b", "70B", "2.7B".
/// A bare number with no size suffix must not match.
static PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)[bB]").expect("parameter pattern is valid")
});

/// Resolve a raw file-derived name into a structured model identity.
///
/// Total function: always returns an identity, never fails.
pub fn resolve(raw_name: &str) -> ModelIdentity {
    let (org, display_name) = split_identity(raw_name);
    let organization = normalize_organization(&org);

    let id_lower = format!("{}/{}", organization, display_name).to_lowercase();
    let family = family_for(&id_lower);
    let is_instruct = id_lower.contains("instruct") || id_lower.contains("chat");

    ModelIdentity {
        organization,
        display_name,
        family,
        parameter_size: extract_parameters(raw_name),
        is_instruct,
    }
}

/// Split a raw name into organization and display-name candidates, prior to
/// normalization. Rules are tried in priority order:
///
/// 1. `<org>_<name>` underscore split (the dataset's dominant convention)
/// 2. known-organization keyword scan
/// 3. token before the first hyphen
/// 4. placeholder organization, raw name kept as display name
fn split_identity(raw_name: &str) -> (String, String) {
    if let Some((org, rest)) = raw_name.split_once('_') {
        return (org.to_string(), rest.to_string());
    }

    let lower = raw_name.to_lowercase();
    for (keyword, org) in ORG_KEYWORDS {
        if lower.contains(keyword) {
            // The meta-llama convention buries the model name behind
            // repeated prefixes; every occurrence is removed.
            let name = if *keyword == "meta-llama" {
                raw_name.replace("fine-tuned-", "").replace("meta-llama-", "")
            } else {
                raw_name.to_string()
            };
            return ((*org).to_string(), name);
        }
    }

    if let Some((head, _)) = raw_name.split_once('-') {
        return (head.to_string(), raw_name.to_string());
    }

    (ORG_PLACEHOLDER.to_string(), raw_name.to_string())
}

/// Normalize an organization token: hyphens become spaces, the result is
/// title-cased, then canonical overrides are applied. Each override is
/// checked against the current value in sequence.
fn normalize_organization(org: &str) -> String {
    let mut org = title_case(&org.replace('-', " "));

    if org.to_lowercase().contains("llama") {
        org = "Meta Llama".to_string();
    }
    if org.to_lowercase().contains("01 ai") {
        org = "01-ai".to_string();
    }
    if org.to_lowercase().contains("qwen") {
        org = "Qwen".to_string();
    }

    org
}

/// Title-case a string: an alphabetic character is uppercased when it follows
/// a non-alphabetic character (or starts the string) and lowercased
/// otherwise. Digits and punctuation pass through and reset the word.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// First family keyword contained in the lowered composed id
fn family_for(id_lower: &str) -> Family {
    for (keyword, family) in FAMILY_KEYWORDS {
        if id_lower.contains(keyword) {
            return *family;
        }
    }
    Family::Unknown
}

/// Extract a parameter-count token such as "7B" from the raw name
fn extract_parameters(raw_name: &str) -> String {
    PARAM_RE
        .captures(raw_name)
        .map(|caps| format!("{}B", &caps[1]))
        .unwrap_or_else(|| "Unknown".to_string())
}
