//! Secret roles and their random assignment.

use crate::error::GameError;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Secret role held by a player for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Role {
    /// Shown the common word.
    Majority,
    /// Shown the different word (the undercover player).
    Minority,
}

impl Role {
    /// Returns true for [`Role::Minority`].
    pub fn is_minority(self) -> bool {
        matches!(self, Role::Minority)
    }
}

/// Builds `minority` Minority roles and `total - minority` Majority roles
/// and returns them in uniformly random order.
///
/// # Errors
///
/// [`GameError::InvalidConfiguration`] if `total` is 0 or `minority`
/// exceeds `total`.
#[instrument(skip(rng))]
pub fn assign_roles<R: RandomSource>(
    minority: usize,
    total: usize,
    rng: &mut R,
) -> Result<Vec<Role>, GameError> {
    if total == 0 {
        warn!("Cannot assign roles to zero players");
        return Err(GameError::invalid_configuration(
            "at least one player is required",
        ));
    }
    if minority > total {
        warn!("More minority roles than players");
        return Err(GameError::invalid_configuration(format!(
            "{} minority roles for {} players",
            minority, total
        )));
    }

    let mut roles = vec![Role::Minority; minority];
    roles.resize(total, Role::Majority);
    rng.shuffle(&mut roles);

    debug!(?roles, "Roles assigned");
    Ok(roles)
}
