//! Assembly of the final `openrc-run` script.
//!
//! Layout, in order:
//!
//! ```text
//! #!/sbin/openrc-run
//!
//! name=$RC_SVCNAME
//! description="..."
//! <command fragment>          (service::generate_service)
//! <supervisor options>        (daemon_args)
//! command_user=...            (fragments::command_user)
//! depend() { ... }            (fragments::depend)
//! stop() { ... }              (fragments::stop)
//! reload() { ... }            (fragments::reload)
//! ```
//!
//! Every fragment is optional except the header. The whole script is built
//! in memory; nothing is returned unless every fragment succeeded.

use crate::directives::{DESCRIPTION, SERVICE_SECTION, UNIT_SECTION};
use crate::error::{ConvertError, Result, ValidationError};
use crate::fragments;
use crate::service::generate_service;
use crate::unit_file::UnitFile;
use crate::validate::validate;

/// Parse, validate and convert unit text.
pub fn convert(text: &str) -> Result<String> {
    convert_unit(&UnitFile::parse(text))
}

/// Validate and convert an already parsed unit.
pub fn convert_unit(unit: &UnitFile) -> Result<String> {
    validate(unit)?;
    let service = unit
        .section(SERVICE_SECTION)
        .ok_or(ValidationError::MissingServiceSection)?;
    let unit_section = unit.section(UNIT_SECTION);

    let description = unit_section
        .and_then(|s| s.get(DESCRIPTION))
        .ok_or_else(|| ConvertError::missing(UNIT_SECTION, DESCRIPTION))?;

    let service_fragments = generate_service(service)?;

    let mut script = header(description);
    script.push_str(&service_fragments.command);
    script.push_str(&service_fragments.daemon_args);
    script.push_str(&fragments::command_user(service));
    script.push_str(&fragments::depend(unit_section));
    script.push_str(&fragments::stop(service));
    script.push_str(&fragments::reload(service));

    Ok(script)
}

fn header(description: &str) -> String {
    format!("#!/sbin/openrc-run\n\nname=$RC_SVCNAME\ndescription=\"{description}\"\n")
}
