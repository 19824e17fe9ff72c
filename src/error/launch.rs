//! Pre-flight and launch errors

use super::impl_error_constructors;

impl_error_constructors!(
    PreflightFailed as preflight_failed(reason),
    AppNotFound as app_not_found(path),
    LaunchFailed as launch_failed(program, reason),
);
