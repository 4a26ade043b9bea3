use thiserror::Error;

use crate::{
    dto::loyalty::{TierResolution, TierTable},
    error::{AppError, AppResult},
    models::LoyaltyTier,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Ways a tier table can fail to partition the non-negative integers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierTableError {
    #[error("tier table is empty")]
    Empty,

    #[error("lowest tier `{tier}` starts at {min_points}, not 0")]
    DoesNotStartAtZero { tier: String, min_points: i64 },

    #[error("tier `{tier}` ends below its start")]
    Inverted { tier: String },

    #[error("points {from}..{to} between `{lower}` and `{upper}` belong to no tier")]
    Gap {
        lower: String,
        upper: String,
        from: i64,
        to: i64,
    },

    #[error("tiers `{lower}` and `{upper}` overlap")]
    Overlap { lower: String, upper: String },

    #[error("only the highest tier may be unbounded, `{tier}` is not the highest")]
    UnboundedBeforeLast { tier: String },

    #[error("highest tier `{tier}` is bounded at {max_points}")]
    BoundedTop { tier: String, max_points: i64 },
}

pub fn sort_tiers(tiers: &mut [LoyaltyTier]) {
    tiers.sort_by_key(|tier| tier.min_points);
}

/// First tier containing `points` in a table sorted by `min_points`,
/// falling back to the lowest tier. `None` only for an empty table.
pub fn resolve_tier(tiers: &[LoyaltyTier], points: i64) -> Option<&LoyaltyTier> {
    tiers
        .iter()
        .find(|tier| tier.contains(points))
        .or_else(|| tiers.first())
}

/// Checks a table sorted by `min_points`.
pub fn validate_tiers(tiers: &[LoyaltyTier]) -> Result<(), TierTableError> {
    let first = tiers.first().ok_or(TierTableError::Empty)?;
    if first.min_points != 0 {
        return Err(TierTableError::DoesNotStartAtZero {
            tier: first.name.clone(),
            min_points: first.min_points,
        });
    }

    for tier in tiers {
        if tier.max_points.is_some_and(|max| max < tier.min_points) {
            return Err(TierTableError::Inverted {
                tier: tier.name.clone(),
            });
        }
    }

    for pair in tiers.windows(2) {
        let [lower, upper] = pair else { continue };
        let Some(max) = lower.max_points else {
            return Err(TierTableError::UnboundedBeforeLast {
                tier: lower.name.clone(),
            });
        };
        // A lower tier reaching i64::MAX leaves no room above it.
        let next = max.checked_add(1).filter(|next| upper.min_points >= *next);
        let Some(next) = next else {
            return Err(TierTableError::Overlap {
                lower: lower.name.clone(),
                upper: upper.name.clone(),
            });
        };
        if upper.min_points > next {
            return Err(TierTableError::Gap {
                lower: lower.name.clone(),
                upper: upper.name.clone(),
                from: next,
                to: upper.min_points - 1,
            });
        }
    }

    if let Some(last) = tiers.last() {
        if let Some(max_points) = last.max_points {
            return Err(TierTableError::BoundedTop {
                tier: last.name.clone(),
                max_points,
            });
        }
    }

    Ok(())
}

/// Validation result of an unsorted table as text, for load-time logging.
pub fn table_problem(tiers: &[LoyaltyTier]) -> Option<String> {
    let mut sorted = tiers.to_vec();
    sort_tiers(&mut sorted);
    validate_tiers(&sorted).err().map(|problem| problem.to_string())
}

async fn sorted_tiers(state: &AppState) -> AppResult<Vec<LoyaltyTier>> {
    let snapshot = state.caches.loyalty_tiers.get(&state.client).await?;
    let mut tiers = snapshot.items.as_ref().clone();
    sort_tiers(&mut tiers);
    Ok(tiers)
}

pub async fn list_tiers(state: &AppState) -> AppResult<ApiResponse<TierTable>> {
    let tiers = sorted_tiers(state).await?;
    let problem = validate_tiers(&tiers).err();
    if let Some(problem) = &problem {
        tracing::warn!(%problem, "loyalty tier table is inconsistent");
    }

    let meta = Meta::total(tiers.len());
    Ok(ApiResponse::success(
        "Loyalty tiers",
        TierTable {
            tiers,
            valid: problem.is_none(),
            problem: problem.map(|p| p.to_string()),
        },
        Some(meta),
    ))
}

pub async fn resolve(state: &AppState, points: i64) -> AppResult<ApiResponse<TierResolution>> {
    if points < 0 {
        return Err(AppError::BadRequest("points must not be negative".into()));
    }

    let tiers = sorted_tiers(state).await?;
    let tier = resolve_tier(&tiers, points)
        .cloned()
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Loyalty tier",
        TierResolution { points, tier },
        Some(Meta::empty()),
    ))
}
