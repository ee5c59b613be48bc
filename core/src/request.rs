use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{SearchFilters, SearchRequest};

/// Page size used by every search call
pub const SEARCH_PAGE_LIMIT: u32 = 50;

pub const MAX_EXPERIENCE_YEARS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Query plus structured filters
    Structured,
    /// Natural-language prompt, no structured filters
    Ai,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Structured => "search",
            SearchMode::Ai => "AI search",
        }
    }
}

/// Raw inputs of a search screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchForm {
    pub query: String,
    pub location: Option<String>,
    pub education: Option<String>,
    pub experience: Option<u32>,
    pub global: bool,
}

impl SearchForm {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Build the request body for one submission
    pub fn build(&self, mode: SearchMode, page: u32) -> Result<SearchRequest> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let filters = match mode {
            SearchMode::Structured => Some(self.filters()?),
            SearchMode::Ai => None,
        };

        Ok(SearchRequest {
            query: query.to_string(),
            is_ai_search: mode == SearchMode::Ai,
            is_global_search: self.global,
            limit: SEARCH_PAGE_LIMIT,
            page: page.max(1),
            filters,
        })
    }

    fn filters(&self) -> Result<SearchFilters> {
        let experience = match self.experience {
            Some(years) if years > MAX_EXPERIENCE_YEARS => {
                return Err(Error::ExperienceOutOfRange(years))
            }
            Some(years) => u8::try_from(years).ok(),
            None => None,
        };

        Ok(SearchFilters {
            location: non_blank(self.location.as_deref()),
            education: non_blank(self.education.as_deref()),
            experience,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_build_trims_query() {
        let form = SearchForm::new("  React developer  ");

        let request = form.build(SearchMode::Structured, 1).unwrap();

        assert_eq!(request.query, "React developer");
        assert_eq!(request.limit, SEARCH_PAGE_LIMIT);
        assert_eq!(request.page, 1);
        assert!(!request.is_ai_search);
    }

    #[test]
    fn test_blank_query_is_skipped() {
        let form = SearchForm::new("   ");

        assert!(!form.can_submit());
        assert_eq!(
            form.build(SearchMode::Structured, 1),
            Err(Error::EmptyQuery)
        );
        assert_eq!(form.build(SearchMode::Ai, 1), Err(Error::EmptyQuery));
    }

    #[test]
    fn test_structured_search_carries_filters() {
        let form = SearchForm {
            query: "backend".to_string(),
            location: Some("Lisbon".to_string()),
            education: Some("  ".to_string()),
            experience: Some(5),
            global: true,
        };

        let request = form.build(SearchMode::Structured, 3).unwrap();
        let filters = request.filters.unwrap();

        assert!(request.is_global_search);
        assert_eq!(request.page, 3);
        assert_eq!(filters.location.as_deref(), Some("Lisbon"));
        assert_eq!(filters.education, None);
        assert_eq!(filters.experience, Some(5));
    }

    #[test]
    fn test_ai_search_drops_filters() {
        let form = SearchForm {
            query: "someone who shipped a compiler".to_string(),
            location: Some("Lisbon".to_string()),
            experience: Some(5),
            ..Default::default()
        };

        let request = form.build(SearchMode::Ai, 1).unwrap();

        assert!(request.is_ai_search);
        assert!(request.filters.is_none());
    }

    #[test]
    fn test_experience_out_of_range() {
        let form = SearchForm {
            query: "backend".to_string(),
            experience: Some(21),
            ..Default::default()
        };

        assert_eq!(
            form.build(SearchMode::Structured, 1),
            Err(Error::ExperienceOutOfRange(21))
        );

        let edge = SearchForm {
            experience: Some(20),
            ..form
        };
        assert!(edge.build(SearchMode::Structured, 1).is_ok());
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let request = SearchForm::new("rust").build(SearchMode::Ai, 0).unwrap();

        assert_eq!(request.page, 1);
    }
}
