//! Tier installation errors

use super::impl_error_constructors;

impl_error_constructors!(
    RequiredTierFailed as required_tier_failed(tier, output),
);
