use anyhow::{Context, Result};
use serde::Deserialize;

use super::Recommendation;

const DEFAULT_WEIGHT: f32 = 1.0;

#[derive(Debug, Deserialize)]
struct RecommendBody {
    #[serde(default)]
    recommendations: Vec<RawRecommendation>,
}

// The endpoint answers with either bare flavor names or weighted objects;
// both shapes appear in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRecommendation {
    Plain(String),
    Weighted {
        target: String,
        #[serde(default)]
        weight: Option<f32>,
    },
}

pub(super) fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>> {
    let body: RecommendBody =
        serde_json::from_str(raw).context("invalid JSON from recommendation endpoint")?;

    Ok(body
        .recommendations
        .into_iter()
        .filter_map(|entry| {
            let (target, weight) = match entry {
                RawRecommendation::Plain(target) => (target, DEFAULT_WEIGHT),
                RawRecommendation::Weighted { target, weight } => {
                    let weight = weight
                        .filter(|value| value.is_finite() && *value > 0.0)
                        .unwrap_or(DEFAULT_WEIGHT);
                    (target, weight)
                }
            };

            let target = target.trim().to_lowercase();
            if target.is_empty() {
                None
            } else {
                Some(Recommendation { target, weight })
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_string_entries() {
        let parsed =
            parse_recommendations(r#"{"recommendations": ["chocolate", "caramel"]}"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Recommendation::new("chocolate", 1.0),
                Recommendation::new("caramel", 1.0),
            ]
        );
    }

    #[test]
    fn parses_weighted_entries() {
        let parsed = parse_recommendations(
            r#"{"recommendations": [{"target": "Chocolate", "weight": 2.5}]}"#,
        )
        .unwrap();
        assert_eq!(parsed, vec![Recommendation::new("chocolate", 2.5)]);
    }

    #[test]
    fn non_positive_weights_fall_back_to_default() {
        let parsed = parse_recommendations(
            r#"{"recommendations": [{"target": "mint", "weight": -3.0}, {"target": "basil"}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            vec![
                Recommendation::new("mint", 1.0),
                Recommendation::new("basil", 1.0),
            ]
        );
    }

    #[test]
    fn missing_recommendations_key_means_empty() {
        assert!(parse_recommendations("{}").unwrap().is_empty());
    }

    #[test]
    fn blank_targets_are_skipped() {
        let parsed = parse_recommendations(r#"{"recommendations": ["", "  ", "pear"]}"#).unwrap();
        assert_eq!(parsed, vec![Recommendation::new("pear", 1.0)]);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_recommendations("not json").is_err());
        assert!(parse_recommendations(r#"{"recommendations": 7}"#).is_err());
    }
}
