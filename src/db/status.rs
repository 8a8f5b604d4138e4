use crate::error::StatusDbError;

use std::fmt;

/// What the administrator asked dpkg to do with the package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkgWant {
    Unknown,
    Install,
    Hold,
    Deinstall,
    Purge,
}

/// Error flags carried by the package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkgFlag {
    Ok,
    // Broken, needs to be reinstalled
    ReinstReq,
}

/// dpkg package state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkgState {
    // Not installed
    NotInstalled,
    // Previously installed, now not installed, config files remains
    ConfigFiles,
    // Installation uncompleted
    HalfInstalled,
    Unpacked,
    HalfConfigured,
    TriggerAwaited,
    TriggerPending,
    Installed,
}

impl TryFrom<&str> for PkgWant {
    type Error = StatusDbError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let res = match s {
            "unknown" => Self::Unknown,
            "install" => Self::Install,
            "hold" => Self::Hold,
            "deinstall" => Self::Deinstall,
            "purge" => Self::Purge,
            unknown => {
                return Err(StatusDbError::MalformedStatus(format!(
                    "invalid want state {}",
                    unknown
                )))
            }
        };
        Ok(res)
    }
}

impl TryFrom<&str> for PkgFlag {
    type Error = StatusDbError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "ok" => Ok(Self::Ok),
            "reinstreq" => Ok(Self::ReinstReq),
            unknown => Err(StatusDbError::MalformedStatus(format!(
                "invalid error flag {}",
                unknown
            ))),
        }
    }
}

impl TryFrom<&str> for PkgState {
    type Error = StatusDbError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let res = match s {
            "not-installed" => Self::NotInstalled,
            "config-files" => Self::ConfigFiles,
            "half-installed" => Self::HalfInstalled,
            "unpacked" => Self::Unpacked,
            "half-configured" => Self::HalfConfigured,
            "triggers-awaited" => Self::TriggerAwaited,
            "triggers-pending" => Self::TriggerPending,
            "installed" => Self::Installed,
            unknown => {
                return Err(StatusDbError::MalformedStatus(format!(
                    "invalid package state {}",
                    unknown
                )))
            }
        };
        Ok(res)
    }
}

impl fmt::Display for PkgState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::NotInstalled => "not-installed",
            Self::ConfigFiles => "config-files",
            Self::HalfInstalled => "half-installed",
            Self::Unpacked => "unpacked",
            Self::HalfConfigured => "half-configured",
            Self::TriggerAwaited => "triggers-awaited",
            Self::TriggerPending => "triggers-pending",
            Self::Installed => "installed",
        };
        f.write_str(s)
    }
}

/// The `Status` field of a record, `want flag state`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PkgStatus {
    pub want: PkgWant,
    pub flag: PkgFlag,
    pub state: PkgState,
}

impl TryFrom<&str> for PkgStatus {
    type Error = StatusDbError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.len() != 3 {
            return Err(StatusDbError::MalformedStatus(format!(
                "expected three words, got \"{}\"",
                s
            )));
        }

        Ok(PkgStatus {
            want: PkgWant::try_from(words[0])?,
            flag: PkgFlag::try_from(words[1])?,
            state: PkgState::try_from(words[2])?,
        })
    }
}
