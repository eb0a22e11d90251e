use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filters::{Availability, ExperienceLevel, WorkType};

/// A freelancer profile card as returned by the profiles endpoint (`kind=FREELANCER`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freelancer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub profession: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub country: Option<String>,
    pub hourly_rate: Option<f64>,
    pub rating: Option<f64>,
    pub experience_level: Option<ExperienceLevel>,
    pub work_type: Option<WorkType>,
    #[serde(rename = "statusAviability")]
    pub availability: Option<Availability>,
    pub created_at: DateTime<Utc>,
}

impl Freelancer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
