//! Mapping of systemd unit names onto OpenRC service names.
//!
//! A few well-known targets have OpenRC virtual services of their own. Every
//! other unit is assumed to have a service of the same base name, i.e. the
//! name with its unit type suffix (`.service`, `.target`, ...) removed.

/// systemd target → OpenRC virtual service.
const WELL_KNOWN_UNITS: &[(&str, &str)] = &[
    ("network.target", "net"),
    ("remote-fs.target", "netmount"),
    ("nss-lookup.target", "dns"),
];

/// Map a single unit name.
///
/// ```
/// use libsystemd2rc::names::unit_to_rc;
/// assert_eq!(unit_to_rc("network.target"), "net");
/// assert_eq!(unit_to_rc("postgresql.service"), "postgresql");
/// ```
#[must_use]
pub fn unit_to_rc(name: &str) -> &str {
    if let Some((_, rc)) = WELL_KNOWN_UNITS.iter().find(|(unit, _)| *unit == name) {
        return *rc;
    }
    name.rsplit_once('.').map_or(name, |(base, _)| base)
}

/// Map a whitespace separated list of unit names, keeping their order.
#[must_use]
pub fn units_to_rc(units: &str) -> String {
    units
        .split_whitespace()
        .map(unit_to_rc)
        .collect::<Vec<_>>()
        .join(" ")
}
