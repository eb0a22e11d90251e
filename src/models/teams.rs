use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team (group of freelancers) from the teams endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub members_count: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    pub rating: Option<f64>,
}
