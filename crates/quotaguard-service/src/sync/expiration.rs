//! Expiration state machine.
//!
//! Evaluated once per sync when the remote document has an expiration.
//! An expired trial renews in place; an expired paid tier is converted to
//! the trial tier and renewed, so nobody is hard-locked out.

use quotaguard_core::result::AppResult;
use quotaguard_core::types::{FlexibleInstant, LicenseUpdate, TierLimits};

/// Where a document sits relative to its expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationState {
    /// `now <= expiration`.
    Active,
    /// Trial tier past its expiration.
    ExpiredTrial,
    /// Any other tier past its expiration.
    ExpiredPaid,
}

impl ExpirationState {
    /// Classify a document's tier and expiration at `now`.
    pub fn classify(
        tier: &str,
        expiration: &FlexibleInstant,
        now: &FlexibleInstant,
        trial_tier: &str,
    ) -> Self {
        if !expiration.is_before(now) {
            Self::Active
        } else if tier == trial_tier {
            Self::ExpiredTrial
        } else {
            Self::ExpiredPaid
        }
    }

    /// The merge write this state requires, if any.
    pub fn transition(
        &self,
        trial: &TrialTerms,
        now: &FlexibleInstant,
    ) -> AppResult<Option<LicenseUpdate>> {
        if *self == Self::Active {
            return Ok(None);
        }
        let renewed = now.plus_days(trial.period_days)?;
        let update = match self {
            Self::Active => None,
            Self::ExpiredTrial => Some(LicenseUpdate::expiration(renewed)),
            Self::ExpiredPaid => {
                let mut update = LicenseUpdate {
                    tier: Some(trial.tier_key.clone()),
                    ..LicenseUpdate::expiration(renewed)
                };
                if let Some(limits) = trial.limits {
                    update.max_devices = Some(limits.max_devices);
                    update.max_groups = Some(limits.max_groups);
                    update.max_accounts = Some(limits.max_accounts);
                    update.max_account_actions = limits.max_account_actions;
                }
                Some(update)
            }
        };
        Ok(update)
    }
}

/// What the trial tier grants on renewal or conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialTerms {
    /// Trial tier key.
    pub tier_key: String,
    /// Renewal length.
    pub period_days: i64,
    /// Trial limits, when the catalog could be reached.
    pub limits: Option<TierLimits>,
}
