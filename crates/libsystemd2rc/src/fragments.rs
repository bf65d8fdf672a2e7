//! Script fragments that do not depend on the service type.

use log::{debug, warn};

use crate::directives::{AFTER, BEFORE, EXEC_RELOAD, EXEC_STOP, GROUP, REQUIRES, USER, WANTS};
use crate::names::units_to_rc;
use crate::unit_file::Section;

/// Dependency directive → `depend()` keyword, in output order.
const DEPENDENCY_VERBS: &[(&str, &str)] = &[
    (AFTER, "after"),
    (BEFORE, "before"),
    (REQUIRES, "need"),
    (WANTS, "use"),
];

/// `command_user="user[:group]"`, if `User=` is set.
#[must_use]
pub fn command_user(service: &Section) -> String {
    match (service.get(USER), service.get(GROUP)) {
        (Some(user), Some(group)) => format!("command_user=\"{user}:{group}\"\n"),
        (Some(user), None) => format!("command_user=\"{user}\"\n"),
        (None, Some(group)) => {
            warn!("Group={group} without User= cannot be expressed, ignoring it");
            String::new()
        }
        (None, None) => String::new(),
    }
}

/// The `depend()` function built from the ordering and requirement
/// directives of `[Unit]`. Empty if there are none.
#[must_use]
pub fn depend(unit: Option<&Section>) -> String {
    let Some(unit) = unit else {
        return String::new();
    };

    let mut body = String::new();
    for (key, verb) in DEPENDENCY_VERBS {
        if let Some(units) = unit.get(key) {
            let services = units_to_rc(units);
            debug!("{key}={units} -> {verb} {services}");
            body.push_str(&format!("\t{verb} {services}\n"));
        }
    }

    if body.is_empty() {
        return String::new();
    }
    format!("\ndepend() {{\n{body}}}\n")
}

/// The `stop()` hook, if `ExecStop=` is set.
#[must_use]
pub fn stop(service: &Section) -> String {
    service
        .get(EXEC_STOP)
        .map(|cmd| hook("stop", "Stopping", cmd))
        .unwrap_or_default()
}

/// The `reload()` hook, if `ExecReload=` is set.
#[must_use]
pub fn reload(service: &Section) -> String {
    service
        .get(EXEC_RELOAD)
        .map(|cmd| hook("reload", "Reloading", cmd))
        .unwrap_or_default()
}

/// A lifecycle function that runs `cmd` verbatim and reports its status.
fn hook(name: &str, action: &str, cmd: &str) -> String {
    format!("\n{name}() {{\n\tebegin \"{action} $RC_SVCNAME\"\n\t{cmd}\n\teend $?\n}}\n")
}
