//! Structural checks run before any script is generated.

use crate::directives::{ENVIRONMENT_FILE, SERVICE_SECTION};
use crate::error::ValidationError;
use crate::unit_file::UnitFile;

/// Checks, in order: a `[Service]` section exists, and it does not use
/// `EnvironmentFile=`.
pub fn validate(unit: &UnitFile) -> Result<(), ValidationError> {
    let service = unit
        .section(SERVICE_SECTION)
        .ok_or(ValidationError::MissingServiceSection)?;

    if service.contains(ENVIRONMENT_FILE) {
        return Err(ValidationError::UnsupportedDirective {
            directive: ENVIRONMENT_FILE.to_owned(),
        });
    }

    Ok(())
}
