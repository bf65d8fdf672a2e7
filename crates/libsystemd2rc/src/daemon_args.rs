//! Option strings for the OpenRC process supervisors.
//!
//! `supervise-daemon` (used for `Type=simple`/`exec`) and
//! `start-stop-daemon` (used for `Type=oneshot`/`forking`) accept a similar
//! set of process setup flags. Both builders emit the shared flags first, in
//! the fixed order of [`SHARED_FLAGS`], followed by the I/O scheduling flag
//! and then the builder specific ones.

use std::borrow::Cow;

use log::debug;

use crate::directives::{
    CPU_SCHEDULING_POLICY, CPU_SCHEDULING_PRIORITY, ENVIRONMENT, IO_SCHEDULING_CLASS,
    IO_SCHEDULING_PRIORITY, NICE, ROOT_DIRECTORY, STANDARD_ERROR, STANDARD_OUTPUT, UMASK,
    WORKING_DIRECTORY,
};
use crate::environment::parse_environment;
use crate::error::{ConvertError, Result};
use crate::unit_file::Section;

/// Directive → supervisor flag, in output order.
const SHARED_FLAGS: &[(&str, &str)] = &[
    (WORKING_DIRECTORY, "-d"),
    (ROOT_DIRECTORY, "-r"),
    (UMASK, "-k"),
    (NICE, "-N"),
];

/// Scheduling class directive and its optional priority, both rendered as
/// `-I class[:priority]`.
const IO_SCHEDULING: (&str, &str) = (IO_SCHEDULING_CLASS, IO_SCHEDULING_PRIORITY);
const CPU_SCHEDULING: (&str, &str) = (CPU_SCHEDULING_POLICY, CPU_SCHEDULING_PRIORITY);

/// Prefix of `StandardOutput=`/`StandardError=` values that name a file.
const FILE_PREFIX: &str = "file:";

/// The process supervisor an init script runs its command under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supervisor {
    SuperviseDaemon,
    StartStopDaemon,
}

impl Supervisor {
    /// Name of the script variable holding this supervisor's options.
    #[must_use]
    pub const fn args_variable(self) -> &'static str {
        match self {
            Self::SuperviseDaemon => "supervise_daemon_args",
            Self::StartStopDaemon => "start_stop_daemon_args",
        }
    }

    /// Render the option line for `service`. Empty if nothing applies.
    pub fn render_args(self, service: &Section) -> Result<String> {
        match self {
            Self::SuperviseDaemon => supervise_daemon_args(service),
            Self::StartStopDaemon => Ok(start_stop_daemon_args(service)),
        }
    }
}

/// Builds `supervise_daemon_args`.
///
/// Besides the shared flags this maps file output (`-1`, `-2`) and the
/// `Environment=` list (`-e`). `StandardError=` defaults to a file
/// `StandardOutput=`, see [`default_standard_error`].
pub fn supervise_daemon_args(service: &Section) -> Result<String> {
    let service = default_standard_error(service);
    let mut flags = shared_flags(&service);

    if let Some(path) = file_target(&service, STANDARD_OUTPUT) {
        push_flag(&mut flags, "-1", path);
    }
    if let Some(path) = file_target(&service, STANDARD_ERROR) {
        push_flag(&mut flags, "-2", path);
    }
    if let Some(raw) = service.get(ENVIRONMENT) {
        let env = parse_environment(raw).map_err(|source| ConvertError::Environment {
            directive: ENVIRONMENT.to_owned(),
            source,
        })?;
        for (key, value) in env.iter() {
            flags.push_str(&format!(" -e {key}=\"{value}\""));
        }
    }

    Ok(render(Supervisor::SuperviseDaemon, &flags))
}

/// Builds `start_stop_daemon_args`: the shared flags plus CPU scheduling.
///
/// CPU scheduling reuses the `-I` flag of I/O scheduling, so a unit setting
/// both produces two `-I` flags.
#[must_use]
pub fn start_stop_daemon_args(service: &Section) -> String {
    let mut flags = shared_flags(service);
    push_scheduling(&mut flags, service, CPU_SCHEDULING);
    render(Supervisor::StartStopDaemon, &flags)
}

/// If `StandardOutput=` is a file and `StandardError=` is unset, returns a
/// view of `service` in which `StandardError=` is the same file.
#[must_use]
pub fn default_standard_error(service: &Section) -> Cow<'_, Section> {
    match service.get(STANDARD_OUTPUT) {
        Some(stdout) if stdout.starts_with(FILE_PREFIX) && !service.contains(STANDARD_ERROR) => {
            debug!("{STANDARD_ERROR}= defaults to {STANDARD_OUTPUT}={stdout}");
            Cow::Owned(service.with_directive(STANDARD_ERROR, stdout))
        }
        _ => Cow::Borrowed(service),
    }
}

fn shared_flags(service: &Section) -> String {
    let mut flags = String::new();
    for (key, flag) in SHARED_FLAGS {
        if let Some(value) = service.get(key) {
            push_flag(&mut flags, flag, value);
        }
    }
    push_scheduling(&mut flags, service, IO_SCHEDULING);
    flags
}

fn push_scheduling(flags: &mut String, service: &Section, (class, priority): (&str, &str)) {
    let Some(class) = service.get(class) else {
        return;
    };
    match service.get(priority) {
        Some(priority) => push_flag(flags, "-I", &format!("{class}:{priority}")),
        None => push_flag(flags, "-I", class),
    }
}

fn push_flag(flags: &mut String, flag: &str, value: &str) {
    flags.push_str(&format!(" {flag} {value}"));
}

fn file_target<'a>(service: &'a Section, key: &str) -> Option<&'a str> {
    service.get(key)?.strip_prefix(FILE_PREFIX)
}

fn render(supervisor: Supervisor, flags: &str) -> String {
    if flags.is_empty() {
        return String::new();
    }
    format!("{}=\"{}\"\n", supervisor.args_variable(), flags.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_file::UnitFile;

    fn service(body: &str) -> Section {
        UnitFile::parse(&format!("[Service]\n{body}"))
            .section("Service")
            .cloned()
            .unwrap()
    }

    #[test]
    fn shared_flags_follow_table_order() {
        let service = service(
            "\
IOSchedulingClass=idle
Nice=5
UMask=0027
RootDirectory=/srv/root
WorkingDirectory=/tmp
",
        );

        assert_eq!(
            supervise_daemon_args(&service).unwrap(),
            "supervise_daemon_args=\"-d /tmp -r /srv/root -k 0027 -N 5 -I idle\"\n"
        );
        assert_eq!(
            start_stop_daemon_args(&service),
            "start_stop_daemon_args=\"-d /tmp -r /srv/root -k 0027 -N 5 -I idle\"\n"
        );
    }

    #[test]
    fn io_scheduling_with_priority() {
        let service = service("IOSchedulingClass=best-effort\nIOSchedulingPriority=4\n");
        assert_eq!(
            start_stop_daemon_args(&service),
            "start_stop_daemon_args=\"-I best-effort:4\"\n"
        );
    }

    #[test]
    fn priority_without_class_is_ignored() {
        let service = service("IOSchedulingPriority=4\nCPUSchedulingPriority=10\n");
        assert_eq!(start_stop_daemon_args(&service), "");
    }

    #[test]
    fn cpu_scheduling_only_for_start_stop_daemon() {
        let service = service(
            "CPUSchedulingPolicy=fifo\nCPUSchedulingPriority=10\nIOSchedulingClass=realtime\n",
        );

        assert_eq!(
            start_stop_daemon_args(&service),
            "start_stop_daemon_args=\"-I realtime -I fifo:10\"\n"
        );
        assert_eq!(
            supervise_daemon_args(&service).unwrap(),
            "supervise_daemon_args=\"-I realtime\"\n"
        );
    }

    #[test]
    fn stdout_file_defaults_stderr() {
        let service = service("StandardOutput=file:/var/log/x.log\n");
        assert_eq!(
            supervise_daemon_args(&service).unwrap(),
            "supervise_daemon_args=\"-1 /var/log/x.log -2 /var/log/x.log\"\n"
        );
    }

    #[test]
    fn explicit_stderr_is_kept() {
        let service = service("StandardOutput=file:/var/log/out\nStandardError=file:/var/log/err\n");
        assert_eq!(
            supervise_daemon_args(&service).unwrap(),
            "supervise_daemon_args=\"-1 /var/log/out -2 /var/log/err\"\n"
        );
    }

    #[test]
    fn non_file_stderr_suppresses_default() {
        let service = service("StandardOutput=file:/var/log/out\nStandardError=journal\n");
        assert_eq!(
            supervise_daemon_args(&service).unwrap(),
            "supervise_daemon_args=\"-1 /var/log/out\"\n"
        );
    }

    #[test]
    fn non_file_stdout_does_not_default_stderr() {
        let service = service("StandardOutput=journal\n");
        assert_eq!(supervise_daemon_args(&service).unwrap(), "");
        assert!(matches!(default_standard_error(&service), Cow::Borrowed(_)));
    }

    #[test]
    fn stderr_file_alone() {
        let service = service("StandardError=file:/var/log/err\n");
        assert_eq!(
            supervise_daemon_args(&service).unwrap(),
            "supervise_daemon_args=\"-2 /var/log/err\"\n"
        );
    }

    #[test]
    fn defaulting_does_not_touch_the_input() {
        let service = service("StandardOutput=file:/x\n");
        let view = default_standard_error(&service);
        assert_eq!(view.get(STANDARD_ERROR), Some("file:/x"));
        assert!(!service.contains(STANDARD_ERROR));
    }

    #[test]
    fn environment_flags_in_parse_order() {
        let service = service("WorkingDirectory=/srv\nEnvironment=B=2 A=\"x y\"\n");
        assert_eq!(
            supervise_daemon_args(&service).unwrap(),
            "supervise_daemon_args=\"-d /srv -e B=\"2\" -e A=\"x y\"\"\n"
        );
    }

    #[test]
    fn start_stop_daemon_ignores_environment_and_output() {
        let service = service("Environment=A=1\nStandardOutput=file:/x\n");
        assert_eq!(start_stop_daemon_args(&service), "");
    }

    #[test]
    fn malformed_environment_is_an_error() {
        let service = service("Environment=NOEQUALS\n");
        assert!(matches!(
            supervise_daemon_args(&service),
            Err(ConvertError::Environment { .. })
        ));
    }

    #[test]
    fn nothing_applicable_renders_nothing() {
        let service = service("ExecStart=/bin/true\nUser=nobody\n");
        assert_eq!(supervise_daemon_args(&service).unwrap(), "");
        assert_eq!(start_stop_daemon_args(&service), "");
    }

    #[test]
    fn supervisor_dispatch() {
        let service = service("Nice=-5\n");
        assert_eq!(
            Supervisor::SuperviseDaemon.render_args(&service).unwrap(),
            "supervise_daemon_args=\"-N -5\"\n"
        );
        assert_eq!(
            Supervisor::StartStopDaemon.render_args(&service).unwrap(),
            "start_stop_daemon_args=\"-N -5\"\n"
        );
    }
}
