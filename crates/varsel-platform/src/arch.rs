//! Architecture values.

use std::str::FromStr;

use sysinfo::System;

use crate::Error;

/// CPU architecture types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X86_64,
    ARM,
    ARM64,
    Unknown,
}

impl Arch {
    /// Canonical attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::ARM => "arm",
            Arch::ARM64 => "aarch64",
            Arch::Unknown => "unknown",
        }
    }

    /// Whether a host of this architecture can run `binary`.
    pub fn runs(self, binary: Arch) -> bool {
        matches!(
            (self, binary),
            (Arch::X86_64, Arch::X86) | (Arch::ARM64, Arch::ARM)
        ) || (self == binary && self != Arch::Unknown)
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i586" | "i686" => Ok(Arch::X86),
            "x86_64" | "x86-64" | "amd64" | "x64" => Ok(Arch::X86_64),
            "arm" | "armv7" | "armv7l" | "armhf" => Ok(Arch::ARM),
            "aarch64" | "arm64" => Ok(Arch::ARM64),
            _ => Err(Error::UnknownArch(s.to_string())),
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Detect the host CPU architecture.
///
/// This is the machine's architecture, so a 32-bit build on a 64-bit host
/// reports the 64-bit one.
pub fn detect() -> Arch {
    System::cpu_arch()
        .parse()
        .unwrap_or_else(|_| std::env::consts::ARCH.parse().unwrap_or(Arch::Unknown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!("amd64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("x64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("ARM64".parse::<Arch>().unwrap(), Arch::ARM64);
        assert_eq!("i686".parse::<Arch>().unwrap(), Arch::X86);
        assert!("riscv64".parse::<Arch>().is_err());
    }

    #[test]
    fn test_runs() {
        assert!(Arch::X86_64.runs(Arch::X86));
        assert!(Arch::X86_64.runs(Arch::X86_64));
        assert!(Arch::ARM64.runs(Arch::ARM));
        assert!(!Arch::X86.runs(Arch::X86_64));
        assert!(!Arch::ARM64.runs(Arch::X86_64));
        assert!(!Arch::Unknown.runs(Arch::Unknown));
    }

    #[test]
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    fn test_detection_runs_own_build() {
        let built = std::env::consts::ARCH.parse::<Arch>().unwrap();
        assert!(detect().runs(built));
    }
}
