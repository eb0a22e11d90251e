use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An agency profile card as returned by the profiles endpoint (`kind=AGENCY`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub rating: Option<f64>,
    pub team_size: Option<u32>,
    pub created_at: DateTime<Utc>,
}
