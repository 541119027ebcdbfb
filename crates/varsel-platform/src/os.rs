//! Operating system values.

use std::str::FromStr;

use sysinfo::System;

use crate::Error;

/// Operating system types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OS {
    Windows,
    Macos,
    Linux,
    FreeBsd,
    Unknown,
}

impl OS {
    /// Canonical attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            OS::Windows => "windows",
            OS::Macos => "macos",
            OS::Linux => "linux",
            OS::FreeBsd => "freebsd",
            OS::Unknown => "unknown",
        }
    }
}

impl FromStr for OS {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" | "win32" | "win64" => Ok(OS::Windows),
            "macos" | "mac" | "osx" | "darwin" => Ok(OS::Macos),
            "linux" => Ok(OS::Linux),
            "freebsd" => Ok(OS::FreeBsd),
            _ => Err(Error::UnknownOS(s.to_string())),
        }
    }
}

impl std::fmt::Display for OS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Detect the running operating system.
///
/// Linux hosts report their distribution name, so unrecognized names fall
/// back to the target the binary was built for.
pub fn detect() -> OS {
    System::name()
        .and_then(|name| name.parse().ok())
        .unwrap_or_else(|| std::env::consts::OS.parse().unwrap_or(OS::Unknown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!("darwin".parse::<OS>().unwrap(), OS::Macos);
        assert_eq!("Win64".parse::<OS>().unwrap(), OS::Windows);
        assert_eq!(" linux ".parse::<OS>().unwrap(), OS::Linux);
        assert_eq!(
            "plan9".parse::<OS>(),
            Err(Error::UnknownOS("plan9".to_string()))
        );
    }

    #[test]
    fn test_system_names() {
        assert_eq!("macOS".parse::<OS>().unwrap(), OS::Macos);
        assert_eq!("Darwin".parse::<OS>().unwrap(), OS::Macos);
        assert_eq!("FreeBSD".parse::<OS>().unwrap(), OS::FreeBsd);
        assert!("Ubuntu".parse::<OS>().is_err());
    }

    #[test]
    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    fn test_detection() {
        assert_eq!(detect(), std::env::consts::OS.parse::<OS>().unwrap());
    }
}
