use super::types::{Cluster, ParticipantRef};
use crate::store::Participant;
use std::collections::HashMap;

/// Group participants by required intervention.
///
/// The first occurrence of an intervention fixes the cluster's title and area
/// of support. A participant listing the same intervention twice is counted
/// once. Clusters come back largest first; equal sizes keep first-seen order.
pub fn build_clusters(participants: &[Participant]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for participant in participants {
        for required in &participant.required_interventions {
            let key = required.id.as_str().to_string();
            let slot = *index.entry(key).or_insert_with(|| {
                clusters.push(Cluster {
                    intervention_id: required.id.clone(),
                    title: required.title.clone(),
                    area_of_support: required.area_of_support.clone(),
                    participants: Vec::new(),
                });
                clusters.len() - 1
            });

            let cluster = &mut clusters[slot];
            if cluster.participants.iter().any(|p| p.id == participant.id) {
                continue;
            }
            cluster.participants.push(ParticipantRef {
                id: participant.id.clone(),
                name: participant.name.clone(),
            });
        }
    }

    clusters.sort_by(|a, b| b.demand().cmp(&a.demand()));
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InterventionId, RequiredIntervention};

    fn participant(id: &str, interventions: &[(&str, &str)]) -> Participant {
        Participant {
            id: id.to_string(),
            name: format!("Company {}", id),
            required_interventions: interventions
                .iter()
                .map(|(iid, title)| RequiredIntervention {
                    id: InterventionId::new(*iid),
                    title: title.to_string(),
                    area_of_support: "Business".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(build_clusters(&[]).is_empty());
    }

    #[test]
    fn test_groups_and_sorts_by_demand() {
        let participants = vec![
            participant("a", &[("i1", "Bookkeeping"), ("i2", "Branding")]),
            participant("b", &[("i2", "Branding")]),
            participant("c", &[("i2", "Brand Strategy"), ("i3", "Export")]),
        ];

        let clusters = build_clusters(&participants);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].intervention_id.as_str(), "i2");
        assert_eq!(clusters[0].demand(), 3);
        // First occurrence wins
        assert_eq!(clusters[0].title, "Branding");
        // Ties keep first-seen order
        assert_eq!(clusters[1].intervention_id.as_str(), "i1");
        assert_eq!(clusters[2].intervention_id.as_str(), "i3");
    }

    #[test]
    fn test_every_requirement_lands_in_exactly_one_cluster() {
        let participants = vec![
            participant("a", &[("1", "x"), ("2", "y"), ("3", "z")]),
            participant("b", &[("2", "y")]),
            participant("c", &[("3", "z"), ("1", "x")]),
            participant("d", &[]),
        ];

        let clusters = build_clusters(&participants);
        for p in &participants {
            for req in &p.required_interventions {
                let hits = clusters
                    .iter()
                    .filter(|c| c.intervention_id == req.id)
                    .flat_map(|c| c.participants.iter())
                    .filter(|m| m.id == p.id)
                    .count();
                assert_eq!(hits, 1, "{} / {}", p.id, req.id);
            }
        }
        let total: usize = clusters.iter().map(|c| c.demand()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_duplicate_requirement_counted_once() {
        let participants = vec![participant("a", &[("1", "x"), ("1", "x")])];
        let clusters = build_clusters(&participants);
        assert_eq!(clusters[0].demand(), 1);
    }
}
