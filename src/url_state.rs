//! Filter state <-> browser URL query string.
//!
//! The URL keeps ISO country codes so links stay locale independent; only
//! requests to the list endpoints carry display names.

use tracing::debug;
use url::form_urlencoded;

use crate::models::filters::FilterSet;

impl FilterSet {
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());

        let mut text = |name: &str, value: Option<&str>| {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                out.append_pair(name, value);
            }
        };

        text("search", self.search.as_deref());
        text("region", self.region.as_deref());
        for skill in &self.skills {
            text("skills", Some(skill.as_str()));
        }
        for country in &self.countries {
            text("country", Some(country.as_str()));
        }
        for level in &self.experience_levels {
            text("experienceLevel", Some(level.as_param()));
        }
        text("workType", self.work_type.as_ref().map(|w| w.as_param()));
        text("profession", self.profession.as_deref());
        text("availability", self.availability.as_ref().map(|a| a.as_param()));
        text("minRate", self.min_rate.map(|v| v.to_string()).as_deref());
        text("maxRate", self.max_rate.map(|v| v.to_string()).as_deref());
        text("minRating", self.min_rating.map(|v| v.to_string()).as_deref());

        out.finish()
    }

    /// Parse filters from a query string (with or without the leading `?`).
    /// Unknown keys and values that fail to parse are skipped.
    pub fn from_query_string(query: &str) -> Self {
        let mut filters = FilterSet::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "search" => filters.search = Some(value.to_string()),
                "region" => filters.region = Some(value.to_string()),
                "skills" => filters.skills.push(value.to_string()),
                "country" => filters.countries.push(value.to_ascii_uppercase()),
                "experienceLevel" => match value.parse() {
                    Ok(level) if !filters.experience_levels.contains(&level) => {
                        filters.experience_levels.push(level)
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Ignoring experienceLevel in URL: {e}"),
                },
                "workType" => filters.work_type = value.parse().ok(),
                "profession" => filters.profession = Some(value.to_string()),
                "availability" => filters.availability = value.parse().ok(),
                "minRate" => filters.min_rate = parse_number(value),
                "maxRate" => filters.max_rate = parse_number(value),
                "minRating" => filters.min_rating = parse_number(value),
                other => debug!("Ignoring unknown URL filter key {other:?}"),
            }
        }

        filters
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
