use super::types::RankedCoordinator;
use crate::store::Coordinator;
use regex::Regex;
use std::cmp::Ordering;
use tracing::debug;

/// Rank the roster for an intervention.
///
/// score = `keyword_weight` × (expertise keywords found as whole words in the
/// title, case-insensitive) + rating. Ties keep roster order.
///
/// A keyword matches when it sits between the ends of the title or non-word
/// characters, so `c++` and `(legal)` match as written.
pub fn rank_coordinators(
    roster: &[Coordinator],
    title: &str,
    keyword_weight: f64,
) -> Vec<RankedCoordinator> {
    let mut ranked: Vec<RankedCoordinator> = roster
        .iter()
        .map(|coordinator| {
            let matches = keyword_matches(&coordinator.expertise, title);
            RankedCoordinator {
                id: coordinator.id.clone(),
                name: coordinator.name.clone(),
                score: keyword_weight * matches as f64 + coordinator.rating.unwrap_or(0.0),
            }
        })
        .collect();

    // Vec::sort_by is stable
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    if let Some(top) = ranked.first() {
        debug!("Top coordinator for '{}': {} ({:.1})", title, top.name, top.score);
    }
    ranked
}

fn keyword_matches(expertise: &[String], title: &str) -> usize {
    expertise
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .filter(|keyword| {
            Regex::new(&format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(keyword)))
                .map(|re| re.is_match(title))
                .unwrap_or(false)
        })
        .count()
}
