#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Structured search constraints that were applied to the scraping query.
///
/// Each field is either absent or a non-empty list of non-blank values. Empty lists and
/// blank strings coming in over the wire normalize to absent, so "populated" has one meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FilterSetInput")]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_titles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    companies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seniority: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_function: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    industry: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FilterSetInput {
    locations: Option<Vec<String>>,
    job_titles: Option<Vec<String>>,
    companies: Option<Vec<String>>,
    seniority: Option<Vec<String>>,
    job_function: Option<Vec<String>>,
    industry: Option<Vec<String>>,
}

impl From<FilterSetInput> for FilterSet {
    fn from(input: FilterSetInput) -> Self {
        Self {
            locations: normalize(input.locations.unwrap_or_default()),
            job_titles: normalize(input.job_titles.unwrap_or_default()),
            companies: normalize(input.companies.unwrap_or_default()),
            seniority: normalize(input.seniority.unwrap_or_default()),
            job_function: normalize(input.job_function.unwrap_or_default()),
            industry: normalize(input.industry.unwrap_or_default()),
        }
    }
}

fn normalize<I, S>(values: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values
        .into_iter()
        .map(Into::into)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    (!values.is_empty()).then_some(values)
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = normalize(values);
        self
    }

    pub fn with_job_titles<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_titles = normalize(values);
        self
    }

    pub fn with_companies<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.companies = normalize(values);
        self
    }

    pub fn with_seniority<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seniority = normalize(values);
        self
    }

    pub fn with_job_function<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_function = normalize(values);
        self
    }

    pub fn with_industry<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industry = normalize(values);
        self
    }

    /// Populated fields as `(label, values)`, always in the same order:
    /// Locations, Job Titles, Companies, Seniority, Job Function, Industry.
    pub fn populated_fields(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Locations", &self.locations),
            ("Job Titles", &self.job_titles),
            ("Companies", &self.companies),
            ("Seniority", &self.seniority),
            ("Job Function", &self.job_function),
            ("Industry", &self.industry),
        ]
        .into_iter()
        .filter_map(|(label, values)| values.as_deref().map(|v| (label, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_and_blank_values_normalize_to_absent() {
        let json = r#"{"locations": [], "job_titles": ["  ", ""], "companies": null}"#;
        let filters: FilterSet = serde_json::from_str(json).unwrap();
        assert!(filters.is_empty());
        assert_eq!(filters, FilterSet::new());
    }

    #[test]
    fn test_populated_fields_keep_fixed_order() {
        let filters = FilterSet::new()
            .with_industry(["Software"])
            .with_locations(["London", " Berlin "])
            .with_seniority(["Director"]);

        let fields = filters.populated_fields();
        let labels: Vec<&str> = fields.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["Locations", "Seniority", "Industry"]);
        assert_eq!(fields[0].1, ["London".to_string(), "Berlin".to_string()]);
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let filters = FilterSet::new().with_companies(["Acme"]);
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value, serde_json::json!({"companies": ["Acme"]}));
    }

    #[test]
    fn test_missing_object_fields_default_to_absent() {
        let filters: FilterSet = serde_json::from_str(r#"{"job_function": ["Marketing"]}"#).unwrap();
        assert_eq!(filters.populated_fields().len(), 1);
        assert_eq!(filters.populated_fields()[0].0, "Job Function");
    }
}
