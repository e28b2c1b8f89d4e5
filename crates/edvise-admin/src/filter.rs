//! Client-side text filtering.
//!
//! Filtering never touches the store: it is a case-insensitive substring
//! check over the already-fetched lists, preserving store order.

use edvise_core::{College, Logo};

/// Colleges whose name or location contains `query`, case-insensitively.
///
/// An empty or all-whitespace query returns the full list unchanged.
/// Otherwise the query is matched as typed, surrounding whitespace included.
pub fn filter_colleges<'a>(colleges: &'a [College], query: &str) -> Vec<&'a College> {
    if query.trim().is_empty() {
        return colleges.iter().collect();
    }
    let query = query.to_lowercase();
    colleges
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query) || c.location.to_lowercase().contains(&query)
        })
        .collect()
}

/// Logos whose name contains `query`, case-insensitively.
pub fn filter_logos<'a>(logos: &'a [Logo], query: &str) -> Vec<&'a Logo> {
    if query.trim().is_empty() {
        return logos.iter().collect();
    }
    let query = query.to_lowercase();
    logos
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn college(name: &str, location: &str) -> College {
        College {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            location: location.to_string(),
            description: None,
            ranking: None,
            admission_rate: None,
            tuition: None,
            website: None,
            image: None,
            logo: None,
            brochure: None,
            created_at: None,
        }
    }

    fn sample() -> Vec<College> {
        vec![
            college("Test U", "Testville"),
            college("North College", "Springfield"),
            college("Springdale Institute", "Riverton"),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        let colleges = sample();
        let filtered = filter_colleges(&colleges, "");
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].name, "Test U");
        assert_eq!(filtered[2].name, "Springdale Institute");
    }

    #[test]
    fn test_whitespace_query_is_identity() {
        let colleges = sample();
        assert_eq!(filter_colleges(&colleges, "   ").len(), 3);
    }

    #[test]
    fn test_matches_name_or_location() {
        let colleges = sample();
        // "spring" hits North College by location and Springdale by name.
        let filtered = filter_colleges(&colleges, "spring");
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "North College");
        assert_eq!(filtered[1].name, "Springdale Institute");
    }

    #[test]
    fn test_surrounding_whitespace_is_matched_literally() {
        let colleges = sample();
        // "spring " (trailing space) is a real query, not "spring": no name
        // or location contains it.
        assert!(filter_colleges(&colleges, "spring ").is_empty());
        // " u" matches the space inside "Test U".
        assert_eq!(filter_colleges(&colleges, " u").len(), 1);
    }

    #[test]
    fn test_case_insensitive() {
        let colleges = sample();
        assert_eq!(filter_colleges(&colleges, "TESTVILLE").len(), 1);
        assert_eq!(filter_colleges(&colleges, "north").len(), 1);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let colleges = sample();
        assert!(filter_colleges(&colleges, "zzz").is_empty());
    }

    #[test]
    fn test_logo_filter_matches_name_only() {
        let logos = vec![
            Logo {
                id: 1,
                name: "Acme Partner".into(),
                logo_url: "https://cdn.example/acme.png".into(),
                created_at: None,
            },
            Logo {
                id: 2,
                name: "Globex".into(),
                logo_url: "https://cdn.example/globex.png".into(),
                created_at: None,
            },
        ];
        assert_eq!(filter_logos(&logos, "acme").len(), 1);
        assert_eq!(filter_logos(&logos, "").len(), 2);
        // URL content is not searched.
        assert!(filter_logos(&logos, "cdn.example").is_empty());
    }
}
