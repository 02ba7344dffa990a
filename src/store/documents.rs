//! Document shapes as they are kept in the incubation store.
//!
//! Field names follow the store's camelCase convention. Flags on intervention
//! records are kept as raw JSON values because the store holds them as
//! booleans, numbers and free-form strings alike; see `planner::enrich::parse_flag`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Intervention identifier, normalised to a string key.
///
/// The store holds these as either strings or numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InterventionId(String);

impl InterventionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InterventionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for InterventionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => InterventionId(s.trim().to_string()),
            Raw::Int(n) => InterventionId(n.to_string()),
            Raw::Float(n) => InterventionId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,

    #[serde(alias = "beneficiaryName")]
    pub name: String,

    #[serde(default)]
    pub required_interventions: Vec<RequiredIntervention>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredIntervention {
    pub id: InterventionId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub area_of_support: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinator {
    pub id: String,

    pub name: String,

    /// 0 to 5
    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub expertise: Vec<String>,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionRecord {
    /// Native document id
    pub id: String,

    /// Alternate identifier some participant records refer to
    #[serde(default)]
    pub intervention_id: Option<InterventionId>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub is_compulsory: serde_json::Value,

    #[serde(default)]
    pub is_recurring: serde_json::Value,

    #[serde(default)]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Authentication id
    pub uid: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Staff record this account belongs to, when linked
    #[serde(default)]
    pub staff_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    #[default]
    Planned,
    Completed,
    Cancelled,
}

/// One participant's indicative calendar slot for an intervention
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: String,
    pub participant_id: String,
    pub participant_name: String,
    pub intervention_id: InterventionId,
    pub intervention_title: String,
    #[serde(default)]
    pub area_of_support: String,
    pub target_date: NaiveDate,
    pub implementation_date: NaiveDate,
    pub consultant_id: String,
    pub consultant_name: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub status: EntryState,
    pub created_by: String,
    pub batch_id: Uuid,
}

/// The full set of collections a store holds
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Documents {
    #[serde(default)]
    pub participants: Vec<Participant>,

    #[serde(default)]
    pub coordinators: Vec<Coordinator>,

    #[serde(default)]
    pub interventions: Vec<InterventionRecord>,

    #[serde(default)]
    pub users: Vec<UserRecord>,

    #[serde(default)]
    pub indicative_calendar: Vec<CalendarEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervention_id_accepts_numbers() {
        let ids: Vec<InterventionId> = serde_json::from_str(r#"["abc", 42, " x1 "]"#).unwrap();
        assert_eq!(ids[0].as_str(), "abc");
        assert_eq!(ids[1].as_str(), "42");
        assert_eq!(ids[2].as_str(), "x1");
    }

    #[test]
    fn test_parse_documents() {
        let json = r#"{
            "participants": [
                {
                    "id": "p1",
                    "beneficiaryName": "Acme Agritech",
                    "requiredInterventions": [
                        {"id": 7, "title": "Financial Literacy", "areaOfSupport": "Finance"}
                    ]
                }
            ],
            "coordinators": [
                {"id": "c1", "name": "Naledi", "rating": 4.5, "expertise": ["finance"]}
            ],
            "interventions": [
                {"id": "7", "title": "Financial Literacy", "isCompulsory": "yes"}
            ]
        }"#;

        let docs: Documents = serde_json::from_str(json).unwrap();
        assert_eq!(docs.participants[0].name, "Acme Agritech");
        assert_eq!(
            docs.participants[0].required_interventions[0].id,
            InterventionId::new("7")
        );
        assert_eq!(docs.coordinators[0].rating, Some(4.5));
        assert_eq!(docs.interventions[0].is_recurring, serde_json::Value::Null);
        assert!(docs.indicative_calendar.is_empty());
    }
}
