use std::path::Path;

use serde::{Deserialize, Serialize};
use talent_core::{Candidate, SearchFilters, SearchRequest};

use crate::errors::ApplicationError;

/// A catalog entry of the stand-in database
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub candidate: Candidate,
    /// Uploaded by the organization itself; the only entries a
    /// non-global search sees
    #[serde(default)]
    pub in_network: bool,
}

/// Load the catalog from a JSON array of entries
pub fn load(path: &Path) -> Result<Vec<CatalogEntry>, ApplicationError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| ApplicationError::Catalog(e.to_string()))
}

/// Term-overlap matching. Not a ranking engine: it only gives clients
/// something stable to page through.
pub fn search(catalog: &[CatalogEntry], request: &SearchRequest) -> Vec<Candidate> {
    let terms: Vec<String> = request
        .query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();
    if terms.is_empty() {
        return vec![];
    }

    let mut hits: Vec<Candidate> = catalog
        .iter()
        .filter(|e| request.is_global_search || e.in_network)
        .filter(|e| {
            request
                .filters
                .as_ref()
                .map_or(true, |f| passes_filters(&e.candidate, f))
        })
        .filter_map(|e| {
            let haystack = haystack(&e.candidate);
            let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
            if matched == 0 {
                return None;
            }

            let score = (matched * 100 / terms.len()).min(100);
            Some(Candidate {
                r#match: u8::try_from(score).unwrap_or(100),
                ..e.candidate.clone()
            })
        })
        .collect();

    hits.sort_by(|a, b| b.r#match.cmp(&a.r#match).then_with(|| a.name.cmp(&b.name)));
    hits
}

fn haystack(candidate: &Candidate) -> String {
    let mut text = vec![
        candidate.name.as_str(),
        candidate.title.as_str(),
        candidate.location.as_str(),
        candidate.education.as_str(),
    ];
    text.extend(candidate.skills.iter().map(String::as_str));
    text.join(" ").to_lowercase()
}

fn passes_filters(candidate: &Candidate, filters: &SearchFilters) -> bool {
    let location_ok = filters.location.as_ref().map_or(true, |l| {
        candidate
            .location
            .to_lowercase()
            .contains(&l.to_lowercase())
    });
    let education_ok = filters.education.as_ref().map_or(true, |e| {
        candidate
            .education
            .to_lowercase()
            .contains(&e.to_lowercase())
    });
    let experience_ok = filters
        .experience
        .map_or(true, |min| years_of(&candidate.experience) >= u32::from(min));

    location_ok && education_ok && experience_ok
}

/// Leading number of a display string like "6 years"
fn years_of(experience: &str) -> u32 {
    experience
        .split_whitespace()
        .next()
        .and_then(|n| n.trim_end_matches('+').parse().ok())
        .unwrap_or(0)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Built-in catalog used when no file is configured
pub fn seed() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            candidate: Candidate {
                id: "c-101".to_string(),
                name: "Sarah Chen".to_string(),
                title: "Senior React Developer".to_string(),
                location: "Berlin, Germany".to_string(),
                experience: "7 years".to_string(),
                education: "MSc Computer Science".to_string(),
                skills: strings(&["React", "TypeScript", "GraphQL"]),
                last_active: "2 hours ago".to_string(),
                ..Default::default()
            },
            in_network: true,
        },
        CatalogEntry {
            candidate: Candidate {
                id: "c-102".to_string(),
                name: "Tom Baker".to_string(),
                title: "Frontend Developer".to_string(),
                location: "London, UK".to_string(),
                experience: "3 years".to_string(),
                education: "BSc Software Engineering".to_string(),
                skills: strings(&["React", "Vue", "CSS"]),
                last_active: "yesterday".to_string(),
                ..Default::default()
            },
            in_network: false,
        },
        CatalogEntry {
            candidate: Candidate {
                id: "c-103".to_string(),
                name: "Priya Raman".to_string(),
                title: "Backend Engineer".to_string(),
                location: "Bangalore, India".to_string(),
                experience: "5 years".to_string(),
                education: "BTech Computer Science".to_string(),
                skills: strings(&["Rust", "Go", "PostgreSQL"]),
                last_active: "3 days ago".to_string(),
                ..Default::default()
            },
            in_network: true,
        },
        CatalogEntry {
            candidate: Candidate {
                id: "c-104".to_string(),
                name: "Lukas Weber".to_string(),
                title: "Data Scientist".to_string(),
                location: "Munich, Germany".to_string(),
                experience: "4 years".to_string(),
                education: "PhD Statistics".to_string(),
                skills: strings(&["Python", "PyTorch", "SQL"]),
                last_active: "1 week ago".to_string(),
                ..Default::default()
            },
            in_network: false,
        },
        CatalogEntry {
            candidate: Candidate {
                id: "c-105".to_string(),
                name: "Amara Okafor".to_string(),
                title: "Full Stack Developer".to_string(),
                location: "Lagos, Nigeria".to_string(),
                experience: "6 years".to_string(),
                education: "BSc Computer Engineering".to_string(),
                skills: strings(&["Node.js", "React", "MongoDB"]),
                last_active: "today".to_string(),
                ..Default::default()
            },
            in_network: false,
        },
        CatalogEntry {
            candidate: Candidate {
                id: "c-106".to_string(),
                name: "Diego Alvarez".to_string(),
                title: "DevOps Engineer".to_string(),
                location: "Madrid, Spain".to_string(),
                experience: "9 years".to_string(),
                education: "BSc Telecommunications".to_string(),
                skills: strings(&["Kubernetes", "Terraform", "AWS"]),
                last_active: "4 days ago".to_string(),
                ..Default::default()
            },
            in_network: true,
        },
        CatalogEntry {
            candidate: Candidate {
                id: "c-107".to_string(),
                name: "Mei Tanaka".to_string(),
                title: "Mobile Developer".to_string(),
                location: "Tokyo, Japan".to_string(),
                experience: "2 years".to_string(),
                education: "BA Design".to_string(),
                skills: strings(&["React Native", "Swift", "Kotlin"]),
                last_active: "today".to_string(),
                ..Default::default()
            },
            in_network: false,
        },
        CatalogEntry {
            candidate: Candidate {
                id: "c-108".to_string(),
                name: "Noah Fischer".to_string(),
                title: "Rust Systems Engineer".to_string(),
                location: "Zurich, Switzerland".to_string(),
                experience: "11 years".to_string(),
                education: "MSc Electrical Engineering".to_string(),
                skills: strings(&["Rust", "C++", "Embedded"]),
                last_active: "2 weeks ago".to_string(),
                ..Default::default()
            },
            in_network: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str, global: bool, filters: Option<SearchFilters>) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            is_ai_search: false,
            is_global_search: global,
            limit: 50,
            page: 1,
            filters,
        }
    }

    #[test]
    fn test_local_search_only_sees_network() {
        let hits = search(&seed(), &request("React", false, None));

        let ids: Vec<_> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c-101"]);
    }

    #[test]
    fn test_global_search_ranks_by_overlap() {
        let hits = search(&seed(), &request("React developer", true, None));

        assert!(hits.len() >= 3);
        assert_eq!(hits[0].r#match, 100);
        assert!(hits.windows(2).all(|w| w[0].r#match >= w[1].r#match));
    }

    #[test]
    fn test_filters_apply() {
        let filters = SearchFilters {
            location: Some("germany".to_string()),
            education: None,
            experience: Some(5),
        };

        let hits = search(&seed(), &request("React Python", true, Some(filters)));

        let ids: Vec<_> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c-101"]);
    }

    #[test]
    fn test_seed_entries_start_unscored() {
        let catalog = seed();

        let mut ids: Vec<_> = catalog.iter().map(|e| e.candidate.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);

        let network: Vec<_> = catalog
            .iter()
            .filter(|e| e.in_network)
            .map(|e| e.candidate.id.as_str())
            .collect();
        assert_eq!(network, vec!["c-101", "c-103", "c-106"]);
        assert!(catalog
            .iter()
            .all(|e| e.candidate.r#match == 0 && !e.candidate.is_saved));
        assert_eq!(catalog[6].candidate.skills[0], "React Native");
    }

    #[test]
    fn test_years_of() {
        assert_eq!(years_of("7 years"), 7);
        assert_eq!(years_of("10+ years"), 10);
        assert_eq!(years_of("junior"), 0);
    }
}
