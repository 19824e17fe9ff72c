//! Capability check errors

use super::impl_error_constructors;

impl_error_constructors!(RequiredPackagesMissing as required_missing(packages));
