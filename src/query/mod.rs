pub mod countries;

use crate::api::ListKind;
use crate::models::filters::FilterSet;

/// Map a filter set onto the query parameters a list endpoint understands.
///
/// Undefined and blank fields are omitted. List-valued fields are sent as
/// repeated parameters (`skills=a&skills=b`) for every list kind. Country
/// codes are sent as display names in `locale`, because the backend matches
/// on names.
pub fn build_params(kind: ListKind, filters: &FilterSet, locale: &str) -> Vec<(String, String)> {
    let mut params = QueryParams::default();

    if kind.is_profile() {
        params.text("search", filters.search.as_deref());
        params.text("region", filters.region.as_deref());
        params.repeated("skills", filters.skills.iter().map(String::as_str));
        params.text(
            "statusAviability",
            filters.availability.as_ref().map(|a| a.as_param()),
        );
        params.text("profession", filters.profession.as_deref());
        params.repeated(
            "experienceLevel",
            filters.experience_levels.iter().map(|l| l.as_param()),
        );
        params.countries(&filters.countries, locale);
        params.text("workType", filters.work_type.as_ref().map(|w| w.as_param()));
        params.number("minRate", filters.min_rate);
        params.number("maxRate", filters.max_rate);
        params.number("minRating", filters.min_rating);
    } else {
        params.text("name", filters.search.as_deref());
        params.repeated("skills", filters.skills.iter().map(String::as_str));
        params.text(
            "availability",
            filters.availability.as_ref().map(|a| a.as_param()),
        );
        params.countries(&filters.countries, locale);
        params.number("minRating", filters.min_rating);
    }

    params.0
}

#[derive(Default)]
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn text(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.0.push((name.to_string(), value.to_string()));
        }
    }

    fn repeated<'a>(&mut self, name: &str, values: impl Iterator<Item = &'a str>) {
        for value in values {
            self.text(name, Some(value));
        }
    }

    fn number(&mut self, name: &str, value: Option<f64>) {
        if let Some(value) = value.filter(|v| v.is_finite()) {
            self.0.push((name.to_string(), value.to_string()));
        }
    }

    fn countries(&mut self, codes: &[String], locale: &str) {
        for code in codes.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
            let name = countries::display_name(code, locale);
            self.0.push(("country".to_string(), name));
        }
    }
}
