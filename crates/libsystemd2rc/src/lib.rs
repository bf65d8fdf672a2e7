//! `libsystemd2rc`: translate systemd service units into OpenRC init scripts.
//!
//! The translation is a two-stage pipeline:
//!
//! 1. [`unit_file`] turns unit text into a [`UnitFile`] (sections of
//!    `key = value` directives plus any directives that ended up outside a
//!    section).
//! 2. [`script`] validates the document and maps a fixed set of directives,
//!    keyed by the declared `Type=`, onto an `openrc-run` script.
//!
//! The result is a best-effort translation. Directives without an OpenRC
//! counterpart are dropped, and values are emitted verbatim without any
//! shell escaping.
//!
//! # Modules
//!
//! - [`error`]: Error types and result aliases
//! - [`unit_file`]: Tolerant INI-style unit parser
//! - [`environment`]: `Environment=` list parsing
//! - [`validate`]: Structural checks run before generation
//! - [`names`]: systemd unit name → OpenRC service name mapping
//! - [`service`]: `Type=` dispatch and the command fragment
//! - [`daemon_args`]: `supervise_daemon_args` / `start_stop_daemon_args`
//! - [`fragments`]: `command_user`, `depend()`, `stop()` and `reload()`
//! - [`script`]: Final script assembly
//!
//! # Example
//!
//! ```
//! let unit = "\
//! [Unit]
//! Description=Example daemon
//! After=network.target
//!
//! [Service]
//! ExecStart=/usr/bin/exampled --foreground
//! ";
//!
//! let script = libsystemd2rc::convert(unit).unwrap();
//! assert!(script.starts_with("#!/sbin/openrc-run\n"));
//! assert!(script.contains("command=\"/usr/bin/exampled\"\n"));
//! assert!(script.contains("\tafter net\n"));
//! ```

pub mod daemon_args;
pub mod environment;
pub mod error;
pub mod fragments;
pub mod names;
pub mod script;
pub mod service;
pub mod unit_file;
pub mod validate;

pub use error::{ConvertError, EnvironmentError, Result, ValidationError};
pub use script::{convert, convert_unit};
pub use unit_file::{Section, UnitFile};

/// Well-known section and directive names consulted during conversion.
///
/// Keys are matched case-sensitively, exactly as they appear in unit files.
pub mod directives {
    pub const UNIT_SECTION: &str = "Unit";
    pub const SERVICE_SECTION: &str = "Service";

    pub const DESCRIPTION: &str = "Description";
    pub const AFTER: &str = "After";
    pub const BEFORE: &str = "Before";
    pub const REQUIRES: &str = "Requires";
    pub const WANTS: &str = "Wants";

    pub const TYPE: &str = "Type";
    pub const EXEC_START: &str = "ExecStart";
    pub const EXEC_STOP: &str = "ExecStop";
    pub const EXEC_RELOAD: &str = "ExecReload";
    pub const PID_FILE: &str = "PIDFile";
    pub const USER: &str = "User";
    pub const GROUP: &str = "Group";
    pub const ENVIRONMENT: &str = "Environment";
    pub const ENVIRONMENT_FILE: &str = "EnvironmentFile";
    pub const WORKING_DIRECTORY: &str = "WorkingDirectory";
    pub const ROOT_DIRECTORY: &str = "RootDirectory";
    pub const UMASK: &str = "UMask";
    pub const NICE: &str = "Nice";
    pub const IO_SCHEDULING_CLASS: &str = "IOSchedulingClass";
    pub const IO_SCHEDULING_PRIORITY: &str = "IOSchedulingPriority";
    pub const CPU_SCHEDULING_POLICY: &str = "CPUSchedulingPolicy";
    pub const CPU_SCHEDULING_PRIORITY: &str = "CPUSchedulingPriority";
    pub const STANDARD_OUTPUT: &str = "StandardOutput";
    pub const STANDARD_ERROR: &str = "StandardError";
}
