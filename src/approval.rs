//! Review approval policy
//!
//! Pure functions; reviews are passed in exactly as the host listed them.

use crate::codeowners::{Codeowners, normalize_login};
use crate::types::{Review, ReviewState};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Decide whether a pull request's reviews satisfy the approval policy.
///
/// With owners configured, any approving review by an owner counts, even
/// if that owner reviewed again afterwards. Without owners, only each
/// reviewer's latest review counts, and one reviewer standing at
/// `Approved` is enough.
pub fn is_approved(reviews: &[Review], codeowners: &Codeowners) -> bool {
    if codeowners.is_empty() {
        has_standing_approval(reviews)
    } else {
        has_owner_approval(reviews, codeowners)
    }
}

/// Some owner approved at some point
pub fn has_owner_approval(reviews: &[Review], codeowners: &Codeowners) -> bool {
    reviews
        .iter()
        .any(|r| r.state == ReviewState::Approved && codeowners.contains(&r.author_login))
}

/// Some reviewer's most recent review is an approval
pub fn has_standing_approval(reviews: &[Review]) -> bool {
    latest_states(reviews)
        .values()
        .any(|state| *state == ReviewState::Approved)
}

/// Latest review state per reviewer, keyed by normalized login
///
/// Later entries in `reviews` supersede earlier ones from the same author.
pub fn latest_states(reviews: &[Review]) -> HashMap<String, ReviewState> {
    reviews
        .iter()
        .map(|r| (normalize_login(&r.author_login), r.state))
        .collect()
}

/// Most recent submission time among the reviews that report one
pub fn last_submitted_at(reviews: &[Review]) -> Option<DateTime<Utc>> {
    reviews.iter().filter_map(|r| r.submitted_at).max()
}
