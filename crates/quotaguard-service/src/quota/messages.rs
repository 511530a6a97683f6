//! User-facing denial reasons.

use quotaguard_core::types::ResourceKind;

/// Shown whenever the entitlement is inactive or expired.
pub const RENEWAL_REQUIRED: &str = "Your subscription has expired. Please renew to continue.";

/// Shown when nobody is signed in.
pub const SIGN_IN_REQUIRED: &str = "Please sign in to manage your plan.";

/// Shown when a device id is blank.
pub const INVALID_DEVICE_ID: &str = "A device identifier is required.";

/// The resource is at its tier limit.
pub fn limit_reached(kind: ResourceKind, tier_name: &str, max: i64) -> String {
    let plural = if max == 1 { "" } else { "s" };
    format!(
        "Your {tier_name} plan allows up to {max} {noun}{plural}. You have reached the {noun} limit ({max}). Upgrade your plan to add more.",
        noun = kind.noun()
    )
}

/// The live count or remote list could not be read.
pub fn unverifiable(kind: ResourceKind) -> String {
    format!(
        "Could not verify your {} usage right now. Please check your connection and try again.",
        kind.noun()
    )
}

/// The device was allowed but could not be written to the remote list.
pub const DEVICE_REGISTRATION_FAILED: &str =
    "This device could not be registered right now. Please try again.";
