//! Query string of `GET /api/routes/suggested`
//!
//! `interests` may repeat (`?interests=a&interests=b`), which the serde
//! based `Query` extractor cannot express, so the raw query is decoded here.

use std::borrow::Cow;

use crate::services::preference_matcher::MatchCriteria;

/// Decode one form-encoded component; `None` when it is not valid UTF-8
fn decode_component(raw: &str) -> Option<String> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

pub fn parse_match_criteria(raw_query: Option<&str>) -> MatchCriteria {
    let mut criteria = MatchCriteria::default();
    let Some(query) = raw_query else {
        return criteria;
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value)) else {
            tracing::debug!(pair, "skipping undecodable query parameter");
            continue;
        };

        match key.as_str() {
            "location" => criteria.location = Some(value),
            "difficulty" => criteria.difficulty = Some(value),
            "interests" | "interests[]" => criteria.interests.push(value),
            _ => {}
        }
    }

    criteria
}
