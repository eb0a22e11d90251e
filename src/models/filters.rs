use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Junior,
    Middle,
    Senior,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    Remote,
    OnSite,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Available,
    PartTime,
    Unavailable,
}

/// Returned when a query-string value does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter value: {0}")]
pub struct UnknownFilterValue(pub String);

macro_rules! wire_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Value as the backend expects it in a query parameter.
            pub fn as_param(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownFilterValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(UnknownFilterValue(other.to_string())),
                }
            }
        }
    };
}

wire_names!(ExperienceLevel {
    Junior => "JUNIOR",
    Middle => "MIDDLE",
    Senior => "SENIOR",
    Expert => "EXPERT",
});

wire_names!(WorkType {
    Remote => "REMOTE",
    OnSite => "ON_SITE",
    Hybrid => "HYBRID",
});

wire_names!(Availability {
    Available => "AVAILABLE",
    PartTime => "PART_TIME",
    Unavailable => "UNAVAILABLE",
});

/// The combined search/filter criteria driving a list query.
///
/// Every recognised option is a field; `None`, blank strings and empty lists
/// mean "not filtered" and are left out of the request. Countries hold ISO
/// 3166-1 alpha-2 codes; translation to display names happens when the query
/// is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub search: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub experience_levels: Vec<ExperienceLevel>,
    pub work_type: Option<WorkType>,
    pub profession: Option<String>,
    pub availability: Option<Availability>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    pub min_rating: Option<f64>,
}

impl FilterSet {
    /// Same filters with the free-text search replaced. Blank text clears it.
    pub fn with_search(&self, search: &str) -> Self {
        let search = search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            ..self.clone()
        }
    }

    /// Trimmed search text, if any.
    pub fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Same filters with non-finite numeric bounds dropped, so that `NaN`
    /// compares equal to an unset bound like it does on the wire.
    pub fn normalized(mut self) -> Self {
        for bound in [&mut self.min_rate, &mut self.max_rate, &mut self.min_rating] {
            if bound.is_some_and(|v| !v.is_finite()) {
                *bound = None;
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
