use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A candidate as returned by the search and shortlist endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Join key between result sets and shortlist state
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    /// Display string, e.g. "5 years"
    #[serde(default)]
    pub experience: String,
    /// Display string
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Display string, e.g. "2 days ago"
    #[serde(default)]
    pub last_active: String,
    /// Match percentage (0..=100)
    #[serde(default, deserialize_with = "lenient_percent")]
    pub r#match: u8,
    #[serde(default)]
    pub is_saved: bool,
}

/// Accepts integers, floats and strings like "87%", rounded and clamped to
/// 0..=100. Anything else reads as 0.
fn lenient_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let percent = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim_end().parse().ok(),
        _ => None,
    }
    .filter(|p: &f64| p.is_finite())
    .unwrap_or(0.0);

    Ok(percent.round().clamp(0.0, 100.0) as u8)
}

/// Structured filters, only sent on the non-AI search path
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Minimum years of experience (0..=20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u8>,
}

/// Request body of the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(rename = "isAIsearch")]
    pub is_ai_search: bool,
    pub is_global_search: bool,
    pub limit: u32,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.total_pages.is_some_and(|total| self.page < total)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Success body of the search endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Candidate>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub remaining_free_searches: u32,
    /// Opaque activity-log entry echoed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_activity: Option<Value>,
}

/// Success body of the save/unsave toggle endpoint
///
/// The backend does not report the resulting saved state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSaveResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_activity: Option<Value>,
}

/// One entry of the saved-candidates listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedCandidate {
    pub candidate: Candidate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    /// Whatever else the backend attaches to the entry
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SavedCandidatesResponse {
    #[serde(default)]
    pub candidates: Vec<SavedCandidate>,
}

/// Error body for non-success statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
