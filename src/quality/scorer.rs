//! Composite quality scoring for a parsed record set.
//!
//! The score answers "how much semantic content did we actually recover
//! from this file", weighting the fields consumers care about most.

use crate::model::Requirement;

/// Weight of meaningful titles in the composite score.
const WEIGHT_TITLES: f64 = 0.3;
/// Weight of meaningful descriptions.
const WEIGHT_DESCRIPTIONS: f64 = 0.3;
/// Weight of resolved type information.
const WEIGHT_TYPES: f64 = 0.2;
/// Weight of having any attributes at all.
const WEIGHT_ATTRIBUTES: f64 = 0.2;

/// A title is meaningful when it is short human text rather than an id
/// echo or a bare number.
#[must_use]
pub fn is_meaningful_title(title: &str, id: &str) -> bool {
    if title.len() < 2 || title.len() >= 200 || title == id {
        return false;
    }
    let digits_only = title
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .all(|c| c.is_ascii_digit());
    !digits_only && title.chars().any(char::is_alphabetic)
}

/// A description is meaningful when it reads like prose: several words of
/// alphabetic text.
#[must_use]
pub fn is_meaningful_description(description: &str) -> bool {
    description.len() >= 10
        && description.split_whitespace().count() >= 3
        && description.chars().any(char::is_alphabetic)
}

/// Fraction of records with a non-empty title or description.
#[must_use]
pub fn resolution_rate(requirements: &[Requirement]) -> f64 {
    if requirements.is_empty() {
        return 0.0;
    }
    let resolved = requirements.iter().filter(|r| r.is_resolved()).count();
    resolved as f64 / requirements.len() as f64
}

/// Composite quality score in 0–100.
#[must_use]
pub fn quality_score(requirements: &[Requirement]) -> f64 {
    if requirements.is_empty() {
        return 0.0;
    }
    let total = requirements.len() as f64;

    let titles = requirements
        .iter()
        .filter(|r| is_meaningful_title(&r.title, &r.id))
        .count() as f64;
    let descriptions = requirements
        .iter()
        .filter(|r| is_meaningful_description(&r.description))
        .count() as f64;
    let types = requirements
        .iter()
        .filter(|r| !r.req_type.is_empty())
        .count() as f64;
    let attributed = requirements
        .iter()
        .filter(|r| !r.attributes.is_empty())
        .count() as f64;

    (titles / total * WEIGHT_TITLES
        + descriptions / total * WEIGHT_DESCRIPTIONS
        + types / total * WEIGHT_TYPES
        + attributed / total * WEIGHT_ATTRIBUTES)
        * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CanonicalValue;

    #[test]
    fn id_echo_is_not_a_meaningful_title() {
        assert!(!is_meaningful_title("REQ-001", "REQ-001"));
        assert!(is_meaningful_title("System shall start", "REQ-001"));
        assert!(!is_meaningful_title("3.1.4", "REQ-001"));
    }

    #[test]
    fn short_fragments_are_not_descriptions() {
        assert!(!is_meaningful_description("ok"));
        assert!(!is_meaningful_description("startup"));
        assert!(is_meaningful_description(
            "The system shall start within five seconds."
        ));
    }

    #[test]
    fn fully_populated_records_score_one_hundred() {
        let mut req = Requirement::new("REQ-1", 0);
        req.title = "System shall start".to_string();
        req.description = "The system shall start within five seconds.".to_string();
        req.req_type = "Functional".to_string();
        req.attributes
            .insert("Status".to_string(), CanonicalValue::from("Approved"));

        let score = quality_score(&[req]);
        assert!((score - 100.0).abs() < f64::EPSILON, "got {score}");
    }

    #[test]
    fn empty_input_scores_zero() {
        assert!(quality_score(&[]).abs() < f64::EPSILON);
        assert!(resolution_rate(&[]).abs() < f64::EPSILON);
    }
}
