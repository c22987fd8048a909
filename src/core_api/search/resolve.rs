use super::types::{Hit, Resolution};
use crate::core_api::error::{NodedocError, Result};
use crate::core_api::pattern::is_exact_match;

/// Fill in `is_exact` for every hit.
pub fn mark_exact(hits: &mut [Hit], term: &str) {
	for hit in hits {
		hit.is_exact = is_exact_match(&hit.header, term);
	}
}

/// Apply the disambiguation policy to the hits of a search for `term`.
///
/// - no hits is [`NodedocError::NotFound`];
/// - a lone hit resolves directly unless `list_mode` is set;
/// - among several hits, a single exact one resolves unless `list_mode` is set;
/// - anything else comes back as candidates with exactness filled in.
pub fn resolve(mut hits: Vec<Hit>, term: &str, list_mode: bool) -> Result<Resolution> {
	if hits.is_empty() {
		return Err(NodedocError::NotFound(format!("no match for '{term}'")));
	}
	if hits.len() == 1 && !list_mode {
		return Ok(Resolution::Single(hits.remove(0)));
	}

	mark_exact(&mut hits, term);
	if !list_mode {
		let mut exact = hits.iter().filter(|hit| hit.is_exact);
		if let (Some(only), None) = (exact.next(), exact.next()) {
			return Ok(Resolution::Single(only.clone()));
		}
	}
	Ok(Resolution::Candidates(hits))
}
