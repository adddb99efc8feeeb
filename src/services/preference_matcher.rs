//! Preference matcher
//!
//! Narrows the route catalog by location, difficulty and interests. The
//! filter is a pure, order-preserving scan: categories combine with AND,
//! interests combine with OR, and an absent criterion never narrows the
//! result.
//!
//! An unrecognised difficulty label is skipped rather than matching
//! nothing. Clients send free-form labels and an unknown one should not
//! empty the suggestion list.

use crate::models::{
    difficulty::{Difficulty, DifficultyMap},
    route::Route,
};
use crate::utils::validation::{non_blank, normalize_labels};

/// How the location criterion is compared against route tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMatch {
    /// Whole-tag equality after lowercasing both sides
    #[default]
    CaseInsensitive,
    /// Byte-for-byte equality
    CaseSensitive,
}

#[derive(Debug, Clone, Default)]
pub struct MatcherConfig {
    pub difficulties: DifficultyMap,
    pub location_tag_match: TagMatch,
}

/// Raw criteria as received from the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchCriteria {
    pub location: Option<String>,
    pub difficulty: Option<String>,
    pub interests: Vec<String>,
}

/// Criteria after normalisation, ready to apply
#[derive(Debug, Clone, PartialEq)]
struct ResolvedCriteria {
    location: Option<String>,
    location_folded: Option<String>,
    difficulty: Option<Difficulty>,
    interests: Vec<String>,
}

impl ResolvedCriteria {
    fn resolve(criteria: &MatchCriteria, config: &MatcherConfig) -> Self {
        let location = non_blank(criteria.location.as_deref()).map(str::to_string);
        let difficulty = non_blank(criteria.difficulty.as_deref())
            .and_then(|label| config.difficulties.resolve(label));
        Self {
            location_folded: location.as_deref().map(str::to_lowercase),
            location,
            difficulty,
            interests: normalize_labels(&criteria.interests),
        }
    }
}

fn matches_location(route: &Route, location: &str, folded: &str, tag_match: TagMatch) -> bool {
    if route.name.to_lowercase().contains(folded) || route.description.to_lowercase().contains(folded) {
        return true;
    }
    match tag_match {
        TagMatch::CaseSensitive => route.has_tag(location),
        TagMatch::CaseInsensitive => route.tags.iter().any(|t| t.to_lowercase() == folded),
    }
}

fn matches_interests(route: &Route, interests: &[String]) -> bool {
    interests.iter().any(|interest| route.has_tag(interest))
}

/// Filter `routes` against `criteria`, keeping catalog order.
pub fn match_routes<'a>(
    routes: &'a [Route],
    criteria: &MatchCriteria,
    config: &MatcherConfig,
) -> Vec<&'a Route> {
    let resolved = ResolvedCriteria::resolve(criteria, config);

    if criteria.difficulty.is_some() && resolved.difficulty.is_none() {
        tracing::debug!(label = ?criteria.difficulty, "unknown difficulty label, filter skipped");
    }

    let results: Vec<&Route> = routes
        .iter()
        .filter(|route| match (&resolved.location, &resolved.location_folded) {
            (Some(location), Some(folded)) => {
                matches_location(route, location, folded, config.location_tag_match)
            }
            _ => true,
        })
        .filter(|route| match resolved.difficulty {
            Some(difficulty) => route.has_tag(difficulty.tag()),
            None => true,
        })
        .filter(|route| resolved.interests.is_empty() || matches_interests(route, &resolved.interests))
        .collect();

    tracing::debug!(
        catalog = routes.len(),
        matched = results.len(),
        "route suggestions computed"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, description: &str, tags: &[&str]) -> Route {
        Route::new(
            name,
            description,
            10.0,
            500.0,
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn catalog() -> Vec<Route> {
        vec![
            route(
                "Lảo Thẩn",
                "Đỉnh nóc nhà Y Tý, nơi săn mây lý tưởng",
                &["easy", "Lào Cai", "cloud-hunting"],
            ),
            route(
                "Núi Bà Đen",
                "Cung đường dốc đá",
                &["hard", "Tây Ninh", "bouldering"],
            ),
            route(
                "Pù Luông",
                "Ruộng bậc thang và homestay",
                &["medium", "Thanh Hóa", "Homestay"],
            ),
            route(
                "Fansipan (Trạm Tôn)",
                "Chinh phục nóc nhà Đông Dương ở Lào Cai",
                &["hard", "Lào Cai", "highest-peak"],
            ),
        ]
    }

    fn names(routes: &[&Route]) -> Vec<String> {
        routes.iter().map(|r| r.name.clone()).collect()
    }

    fn criteria() -> MatchCriteria {
        MatchCriteria::default()
    }

    #[test]
    fn test_empty_criteria_returns_catalog_in_order() {
        let routes = catalog();
        let result = match_routes(&routes, &criteria(), &MatcherConfig::default());
        assert_eq!(result.len(), routes.len());
        for (matched, original) in result.iter().zip(routes.iter()) {
            assert_eq!(matched.id, original.id);
        }
    }

    #[test]
    fn test_difficulty_label_is_translated() {
        let routes = catalog();
        let result = match_routes(
            &routes,
            &MatchCriteria {
                difficulty: Some("beginner".into()),
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&result), vec!["Lảo Thẩn"]);

        let result = match_routes(
            &routes,
            &MatchCriteria {
                difficulty: Some("Chuyên nghiệp".into()),
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&result), vec!["Núi Bà Đen", "Fansipan (Trạm Tôn)"]);
    }

    #[test]
    fn test_unknown_difficulty_is_ignored() {
        let routes = catalog();
        let config = MatcherConfig::default();
        let base = MatchCriteria {
            interests: vec!["bouldering".into(), "Homestay".into()],
            ..criteria()
        };
        let expected = names(&match_routes(&routes, &base, &config));

        for label in ["New", "easy", "super hard", ""] {
            let with_label = MatchCriteria {
                difficulty: Some(label.into()),
                ..base.clone()
            };
            assert_eq!(names(&match_routes(&routes, &with_label, &config)), expected);
        }
    }

    #[test]
    fn test_location_matches_tag_case_insensitively() {
        let routes = catalog();
        let result = match_routes(
            &routes,
            &MatchCriteria {
                location: Some("lào cai".into()),
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&result), vec!["Lảo Thẩn", "Fansipan (Trạm Tôn)"]);
    }

    #[test]
    fn test_location_case_sensitive_tags() {
        let routes = vec![route("Lảo Thẩn", "", &["easy", "Lào Cai"])];
        let config = MatcherConfig {
            location_tag_match: TagMatch::CaseSensitive,
            ..MatcherConfig::default()
        };
        let lower = MatchCriteria {
            location: Some("lào cai".into()),
            ..criteria()
        };
        assert!(match_routes(&routes, &lower, &config).is_empty());

        let exact = MatchCriteria {
            location: Some("Lào Cai".into()),
            ..criteria()
        };
        assert_eq!(match_routes(&routes, &exact, &config).len(), 1);
    }

    #[test]
    fn test_location_substring_of_name_or_description() {
        let routes = catalog();
        let by_name = match_routes(
            &routes,
            &MatchCriteria {
                location: Some("bà đen".into()),
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&by_name), vec!["Núi Bà Đen"]);

        let by_description = match_routes(
            &routes,
            &MatchCriteria {
                location: Some("RUỘNG BẬC THANG".into()),
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&by_description), vec!["Pù Luông"]);
    }

    #[test]
    fn test_location_tag_needs_whole_match() {
        let routes = catalog();
        let result = match_routes(
            &routes,
            &MatchCriteria {
                location: Some("Ninh Bình".into()),
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_interests_are_ored() {
        let routes = catalog();
        let result = match_routes(
            &routes,
            &MatchCriteria {
                interests: vec!["bouldering".into(), "swimming".into()],
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&result), vec!["Núi Bà Đen"]);
    }

    #[test]
    fn test_interest_membership_property() {
        let routes = catalog();
        let config = MatcherConfig::default();
        let cases: Vec<Vec<String>> = vec![
            vec!["cloud-hunting".into()],
            vec!["Homestay".into(), "highest-peak".into()],
            vec!["diving".into()],
            vec!["hard".into()],
        ];
        for interests in cases {
            let result = match_routes(
                &routes,
                &MatchCriteria {
                    interests: interests.clone(),
                    ..criteria()
                },
                &config,
            );
            for route in &routes {
                let expected = route.tags.iter().any(|t| interests.contains(t));
                let found = result.iter().any(|r| r.id == route.id);
                assert_eq!(expected, found, "route {} interests {:?}", route.name, interests);
            }
        }
    }

    #[test]
    fn test_blank_interests_are_skipped() {
        let routes = catalog();
        let result = match_routes(
            &routes,
            &MatchCriteria {
                interests: vec!["  ".into(), "".into()],
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(result.len(), routes.len());

        let result = match_routes(
            &routes,
            &MatchCriteria {
                interests: vec![" bouldering ".into(), "".into()],
                ..criteria()
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&result), vec!["Núi Bà Đen"]);
    }

    #[test]
    fn test_filters_are_anded() {
        let routes = catalog();
        let result = match_routes(
            &routes,
            &MatchCriteria {
                location: Some("Lào Cai".into()),
                difficulty: Some("professional".into()),
                interests: vec!["highest-peak".into(), "cloud-hunting".into()],
            },
            &MatcherConfig::default(),
        );
        assert_eq!(names(&result), vec!["Fansipan (Trạm Tôn)"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let routes = catalog();
        let snapshot = routes.clone();
        let _ = match_routes(
            &routes,
            &MatchCriteria {
                location: Some("lào cai".into()),
                difficulty: Some("beginner".into()),
                interests: vec!["cloud-hunting".into()],
            },
            &MatcherConfig::default(),
        );
        assert_eq!(routes, snapshot);
    }
}
