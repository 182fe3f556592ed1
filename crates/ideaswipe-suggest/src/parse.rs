use std::sync::LazyLock;

use ideaswipe_core::Idea;
use regex::Regex;
use serde_json::Value;

/// ```json fence whose body is the shortest `{...}` span.
static FENCED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").expect("valid regex"));

/// Shortest `{...}` spans, left to right.
static OBJECT_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*?\}").expect("valid regex"));

type Strategy = fn(&str) -> Option<Idea>;

/// Tried in order; the first hit wins. Cheapest and most common first.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("outer-span", outer_span),
    ("fenced-block", fenced_block),
    ("named-fragment", named_fragment),
];

/// Recover an idea object from free-form model output.
/// Returns `None` when no strategy finds one.
pub fn extract_idea(raw: &str) -> Option<Idea> {
    STRATEGIES.iter().find_map(|(label, attempt)| {
        let idea = attempt(raw)?;
        tracing::debug!("[ideaswipe-suggest] extracted idea via {label}");
        Some(idea)
    })
}

fn parse_object(candidate: &str) -> Option<Idea> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    Idea::from_json(&value)
}

/// First `{` through last `}`.
fn outer_span(raw: &str) -> Option<Idea> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&raw[start..=end])
}

fn fenced_block(raw: &str) -> Option<Idea> {
    let caps = FENCED_OBJECT.captures(raw)?;
    parse_object(caps.get(1)?.as_str())
}

/// Every short `{...}` span; accept the first that parses and carries a name,
/// so unrelated JSON fragments in the prose are skipped.
fn named_fragment(raw: &str) -> Option<Idea> {
    OBJECT_FRAGMENT
        .find_iter(raw)
        .filter_map(|m| parse_object(m.as_str()))
        .find(|idea| idea.name.as_deref().is_some_and(|n| !n.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_idea() -> Idea {
        Idea {
            name: Some("ShiftSense".into()),
            tagline: Some("Staffing forecasts for clinics".into()),
            pitch: Some("Predicts patient volume to schedule staff.".into()),
            vibe: Some("HealthTech".into()),
            problem: Some("Clinics overstaff by 15%".into()),
            solution: Some("Forecasting plus scheduling".into()),
            target_audience: Some("Outpatient clinic operators".into()),
            secret_sauce: Some("Regional demand data".into()),
            monetization: Some("$400 per location per month".into()),
            hurdle: Some("EHR integrations".into()),
            first_step: Some("Pilot with three clinics".into()),
        }
    }

    #[test]
    fn clean_object_round_trips() {
        let idea = complete_idea();
        let raw = serde_json::to_string(&idea).unwrap();
        assert_eq!(extract_idea(&raw), Some(idea.clone()));

        let pretty = serde_json::to_string_pretty(&idea).unwrap();
        assert_eq!(extract_idea(&pretty), Some(idea));
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = format!(
            "Sure! Here is your idea:\n\n{}\n\nLet me know if you want changes.",
            serde_json::to_string_pretty(&complete_idea()).unwrap()
        );
        assert_eq!(extract_idea(&raw), Some(complete_idea()));
    }

    #[test]
    fn fenced_block_wins_when_outer_span_is_malformed() {
        let raw = "Thinking {about it...\n```json\n{\"name\": \"Fenced\", \"vibe\": \"FinTech\"}\n```\nThat's it }";
        assert!(outer_span(raw).is_none());
        let idea = extract_idea(raw).unwrap();
        assert_eq!(idea.name.as_deref(), Some("Fenced"));
        assert_eq!(idea.vibe.as_deref(), Some("FinTech"));
    }

    #[test]
    fn named_fragment_skips_malformed_span() {
        let raw = r#"garbage {not json} more garbage {"name":"X","tagline":"Valid"}"#;
        assert!(outer_span(raw).is_none());
        assert!(fenced_block(raw).is_none());
        let idea = extract_idea(raw).unwrap();
        assert_eq!(idea.name.as_deref(), Some("X"));
        assert_eq!(idea.tagline.as_deref(), Some("Valid"));
    }

    #[test]
    fn named_fragment_requires_name() {
        let raw = r#"{"score": 3} then {"name":"Named"} trailing {"#;
        let idea = named_fragment(raw).unwrap();
        assert_eq!(idea.name.as_deref(), Some("Named"));

        assert!(named_fragment(r#"{"pitch":"no name"} and {"name": ""}"#).is_none());
    }

    #[test]
    fn no_braces_fails() {
        assert_eq!(extract_idea("no braces at all"), None);
    }

    #[test]
    fn reversed_braces_fail() {
        assert_eq!(extract_idea("} backwards {"), None);
    }

    #[test]
    fn outer_span_accepts_objects_without_name() {
        let idea = extract_idea(r#"{"pitch": "anonymous"}"#).unwrap();
        assert_eq!(idea.name, None);
        assert_eq!(idea.pitch.as_deref(), Some("anonymous"));
    }

    #[test]
    fn arrays_are_not_ideas() {
        assert_eq!(extract_idea("[1, 2, 3]"), None);
    }
}
