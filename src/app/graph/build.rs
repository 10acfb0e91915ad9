use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::recommend::Recommendation;
use crate::util::stable_pair;

use super::{FlavorLink, FlavorNode, GraphSnapshot, ResolvedLink};

const SEED_JITTER: f32 = 120.0;

/// Builds a fresh snapshot from the active terms and whatever recommendations
/// have been fetched for them. Nodes are the distinct endpoints appearing
/// across all links, in first-appearance order; a term whose fetch produced
/// nothing contributes no links and therefore no node. Returns `None` for an
/// empty graph, in which case no simulation is started.
pub fn build_snapshot(
    terms: &[String],
    recommendations_by_term: &HashMap<String, Vec<Recommendation>>,
) -> Option<GraphSnapshot> {
    let mut links = Vec::new();
    for term in terms {
        let Some(recommendations) = recommendations_by_term.get(term) else {
            continue;
        };
        for recommendation in recommendations {
            // self-pairings would degenerate into zero-length springs
            if recommendation.target == *term {
                continue;
            }
            links.push(FlavorLink {
                source: term.clone(),
                target: recommendation.target.clone(),
                weight: recommendation.weight,
            });
        }
    }

    if links.is_empty() {
        return None;
    }

    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut nodes = Vec::new();
    for key in links.iter().flat_map(|link| [&link.source, &link.target]) {
        if index_by_key.contains_key(key) {
            continue;
        }
        index_by_key.insert(key.clone(), nodes.len());
        let (jx, jy) = stable_pair(key);
        nodes.push(FlavorNode {
            key: key.clone(),
            pos: vec2(jx, jy) * SEED_JITTER,
            vel: Vec2::ZERO,
            pinned: None,
        });
    }

    let mut degree = vec![0usize; nodes.len()];
    let mut endpoints = Vec::with_capacity(links.len());
    for link in &links {
        let source = index_by_key[&link.source];
        let target = index_by_key[&link.target];
        degree[source] += 1;
        degree[target] += 1;
        endpoints.push((source, target));
    }

    let resolved = endpoints
        .into_iter()
        .map(|(source, target)| {
            let source_degree = degree[source] as f32;
            let target_degree = degree[target] as f32;
            ResolvedLink {
                source,
                target,
                strength: 1.0 / source_degree.min(target_degree),
                bias: source_degree / (source_degree + target_degree),
            }
        })
        .collect();

    Some(GraphSnapshot {
        nodes,
        links,
        resolved,
        index_by_key,
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn recommendations(targets: &[&str]) -> Vec<Recommendation> {
        targets
            .iter()
            .map(|target| Recommendation::new(*target, 1.0))
            .collect()
    }

    #[test]
    fn vanilla_scenario_yields_three_nodes_and_two_links() {
        let terms = vec!["vanilla".to_string()];
        let mut by_term = HashMap::new();
        by_term.insert(
            "vanilla".to_string(),
            recommendations(&["chocolate", "caramel"]),
        );

        let snapshot = build_snapshot(&terms, &by_term).unwrap();
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.link_count(), 2);

        let keys: Vec<&str> = snapshot.nodes.iter().map(|node| node.key.as_str()).collect();
        assert_eq!(keys, vec!["vanilla", "chocolate", "caramel"]);
    }

    #[test]
    fn no_terms_means_no_snapshot() {
        assert!(build_snapshot(&[], &HashMap::new()).is_none());
    }

    #[test]
    fn terms_without_recommendations_contribute_nothing() {
        let terms = vec!["vanilla".to_string(), "mint".to_string()];
        let mut by_term = HashMap::new();
        by_term.insert("vanilla".to_string(), recommendations(&["chocolate"]));
        by_term.insert("mint".to_string(), Vec::new());

        let snapshot = build_snapshot(&terms, &by_term).unwrap();
        assert_eq!(snapshot.node_count(), 2);
        assert!(snapshot.index_of("mint").is_none());
    }

    #[test]
    fn shared_targets_are_deduplicated() {
        let terms = vec!["vanilla".to_string(), "coffee".to_string()];
        let mut by_term = HashMap::new();
        by_term.insert("vanilla".to_string(), recommendations(&["chocolate"]));
        by_term.insert("coffee".to_string(), recommendations(&["chocolate"]));

        let snapshot = build_snapshot(&terms, &by_term).unwrap();
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.link_count(), 2);
    }

    #[test]
    fn self_pairings_are_dropped() {
        let terms = vec!["vanilla".to_string()];
        let mut by_term = HashMap::new();
        by_term.insert("vanilla".to_string(), recommendations(&["vanilla"]));
        assert!(build_snapshot(&terms, &by_term).is_none());
    }

    #[test]
    fn node_order_is_stable_across_identical_rebuilds() {
        let terms = vec!["vanilla".to_string()];
        let mut by_term = HashMap::new();
        by_term.insert(
            "vanilla".to_string(),
            recommendations(&["chocolate", "caramel", "pear"]),
        );

        let first = build_snapshot(&terms, &by_term).unwrap();
        let second = build_snapshot(&terms, &by_term).unwrap();
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(a.key, b.key);
            assert_eq!(a.pos, b.pos);
        }
    }

    fn mapping_strategy() -> impl Strategy<Value = (Vec<String>, HashMap<String, Vec<Recommendation>>)>
    {
        let term = "[a-e]{1,3}";
        let recommendation = (term, 0.1f32..5.0)
            .prop_map(|(target, weight)| Recommendation::new(target, weight));
        (
            prop::collection::vec(term, 0..6),
            prop::collection::hash_map(term, prop::collection::vec(recommendation, 0..5), 0..6),
        )
    }

    proptest! {
        #[test]
        fn links_always_reference_existing_nodes((terms, by_term) in mapping_strategy()) {
            if let Some(snapshot) = build_snapshot(&terms, &by_term) {
                for link in &snapshot.links {
                    prop_assert!(snapshot.index_of(&link.source).is_some());
                    prop_assert!(snapshot.index_of(&link.target).is_some());
                }
                for resolved in &snapshot.resolved {
                    prop_assert!(resolved.source < snapshot.node_count());
                    prop_assert!(resolved.target < snapshot.node_count());
                    prop_assert!(resolved.strength.is_finite() && resolved.strength > 0.0);
                }

                let mut seen = std::collections::HashSet::new();
                for node in &snapshot.nodes {
                    prop_assert!(seen.insert(node.key.clone()), "duplicate node key {}", node.key);
                }
            }
        }
    }
}
