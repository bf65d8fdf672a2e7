//! `Type=` dispatch: the command fragment of the script.

use std::fmt;

use log::{info, warn};

use crate::daemon_args::Supervisor;
use crate::directives::{EXEC_START, PID_FILE, SERVICE_SECTION, TYPE};
use crate::error::{ConvertError, Result};
use crate::unit_file::Section;

/// The execution model declared by `Type=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceType {
    Simple,
    Exec,
    OneShot,
    Forking,
    /// Any model without an OpenRC translation (`notify`, `dbus`, ...).
    Unsupported(String),
}

impl ServiceType {
    /// Interpret a `Type=` value; an absent directive means `simple`.
    #[must_use]
    pub fn from_directive(value: Option<&str>) -> Self {
        match value.unwrap_or("simple") {
            "simple" => Self::Simple,
            "exec" => Self::Exec,
            "oneshot" => Self::OneShot,
            "forking" => Self::Forking,
            other => Self::Unsupported(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Simple => "simple",
            Self::Exec => "exec",
            Self::OneShot => "oneshot",
            Self::Forking => "forking",
            Self::Unsupported(other) => other,
        }
    }

    /// The supervisor whose options accompany the command, if any.
    #[must_use]
    pub const fn supervisor(&self) -> Option<Supervisor> {
        match self {
            Self::Simple | Self::Exec => Some(Supervisor::SuperviseDaemon),
            Self::OneShot | Self::Forking => Some(Supervisor::StartStopDaemon),
            Self::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ExecStart=` split into the executable and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commandline {
    pub cmd: String,
    pub args: Vec<String>,
}

impl Commandline {
    /// Split on whitespace. `None` if there is no executable.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let cmd = parts.next()?.to_owned();
        Some(Self {
            cmd,
            args: parts.map(str::to_owned).collect(),
        })
    }

    /// Arguments joined with single spaces.
    #[must_use]
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

/// The generated command section and supervisor options of a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFragments {
    pub command: String,
    pub daemon_args: String,
}

/// Generate the command fragment and supervisor options for `service`.
///
/// An unsupported `Type=` yields empty fragments.
pub fn generate_service(service: &Section) -> Result<ServiceFragments> {
    let service_type = ServiceType::from_directive(service.get(TYPE));

    let Some(supervisor) = service_type.supervisor() else {
        warn!("Type={service_type} has no OpenRC equivalent, no command will be generated");
        return Ok(ServiceFragments::default());
    };
    info!("Generating {service_type} unit");

    let command = match service_type {
        ServiceType::Simple | ServiceType::Exec => {
            let exec = exec_start(service)?;
            format!(
                "\nsupervisor=\"supervise-daemon\"\ncommand=\"{}\"\ncommand_args=\"{}\"\n",
                exec.cmd,
                exec.joined_args()
            )
        }
        ServiceType::OneShot => {
            let exec = exec_start(service)?;
            format!(
                "\ncommand=\"{}\"\ncommand_args=\"{}\"\n",
                exec.cmd,
                exec.joined_args()
            )
        }
        ServiceType::Forking => {
            let exec = exec_start(service)?;
            let pidfile = service
                .get(PID_FILE)
                .ok_or_else(|| ConvertError::missing(SERVICE_SECTION, PID_FILE))?;
            format!(
                "\ncommand=\"{}\"\ncommand_args=\"{}\"\npidfile=\"{pidfile}\"\n",
                exec.cmd,
                exec.joined_args()
            )
        }
        ServiceType::Unsupported(_) => String::new(),
    };

    Ok(ServiceFragments {
        command,
        daemon_args: supervisor.render_args(service)?,
    })
}

fn exec_start(service: &Section) -> Result<Commandline> {
    service
        .get(EXEC_START)
        .and_then(Commandline::parse)
        .ok_or_else(|| ConvertError::missing(SERVICE_SECTION, EXEC_START))
}
