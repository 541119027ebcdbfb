//! Host platform and the rules for the `os` / `arch` attributes.

use std::str::FromStr;

use once_cell::sync::Lazy;
use varsel_attr::{Attribute, AttributeValue};
use varsel_schema::{CompatibilityRule, DisambiguationRule, SchemaBuilder};

use crate::{Arch, OS, arch, os};

pub const OS_ATTRIBUTE: &str = "os";
pub const ARCH_ATTRIBUTE: &str = "arch";

pub fn os_attribute() -> Attribute { Attribute::raw(OS_ATTRIBUTE) }

pub fn arch_attribute() -> Attribute { Attribute::raw(ARCH_ATTRIBUTE) }

static HOST: Lazy<Platform> = Lazy::new(|| Platform::new(os::detect(), arch::detect()));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os:   OS,
    pub arch: Arch,
}

impl Platform {
    pub fn new(os: OS, arch: Arch) -> Self { Self { os, arch } }

    /// Host platform, probed once per process.
    pub fn detect() -> Self { *HOST }

    /// Register `os` and `arch` with rules that prefer this platform.
    pub fn register(self, builder: SchemaBuilder) -> SchemaBuilder {
        let host = self;
        builder
            .attribute(os_attribute())
            .attribute(arch_attribute())
            .compatibility(
                OS_ATTRIBUTE,
                CompatibilityRule::custom(|requested, candidate| {
                    Ok(same::<OS>(requested, candidate))
                }),
            )
            .disambiguation(
                OS_ATTRIBUTE,
                DisambiguationRule::custom(move |requested, candidates| {
                    let target = requested
                        .and_then(parse::<OS>)
                        .unwrap_or(host.os);
                    Ok(prefer(target, candidates))
                }),
            )
            .compatibility(
                ARCH_ATTRIBUTE,
                CompatibilityRule::custom(|requested, candidate| {
                    Ok(match (parse::<Arch>(requested), parse::<Arch>(candidate)) {
                        (Some(requested), Some(candidate)) => requested.runs(candidate),
                        _ => requested == candidate,
                    })
                }),
            )
            .disambiguation(
                ARCH_ATTRIBUTE,
                DisambiguationRule::custom(move |requested, candidates| {
                    let target = requested
                        .and_then(parse::<Arch>)
                        .unwrap_or(host.arch);
                    Ok(prefer(target, candidates))
                }),
            )
    }
}

fn parse<T: FromStr>(value: &AttributeValue) -> Option<T> { value.as_str()?.parse().ok() }

/// Canonical equality, falling back to raw equality for unknown spellings.
fn same<T: FromStr + PartialEq>(a: &AttributeValue, b: &AttributeValue) -> bool {
    match (parse::<T>(a), parse::<T>(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

/// Values naming `target`, or all of them if none does.
fn prefer<T: FromStr + PartialEq>(target: T, candidates: &[AttributeValue]) -> Vec<AttributeValue> {
    let preferred: Vec<_> = candidates
        .iter()
        .filter(|value| parse::<T>(value).as_ref() == Some(&target))
        .cloned()
        .collect();

    if preferred.is_empty() {
        candidates.to_vec()
    } else {
        preferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varsel_schema::Schema;

    fn schema() -> Schema {
        Platform::new(OS::Linux, Arch::X86_64)
            .register(Schema::builder())
            .build()
            .unwrap()
    }

    fn values(raw: &[&str]) -> Vec<AttributeValue> { raw.iter().map(|v| (*v).into()).collect() }

    #[test]
    fn test_host_is_probed_once() {
        let host = Platform::detect();
        assert_eq!(host, Platform::detect());
        assert_eq!(host.os, os::detect());
    }

    #[test]
    fn test_os_aliases_are_compatible() {
        let schema = schema();
        let os = os_attribute();
        assert!(schema.match_value(&os, &"macos".into(), &"darwin".into()).unwrap());
        assert!(!schema.match_value(&os, &"macos".into(), &"linux".into()).unwrap());
        assert!(schema.match_value(&os, &"haiku".into(), &"haiku".into()).unwrap());
    }

    #[test]
    fn test_arch_accepts_32_bit_on_64_bit() {
        let schema = schema();
        let arch = arch_attribute();
        assert!(schema.match_value(&arch, &"x64".into(), &"i686".into()).unwrap());
        assert!(schema.match_value(&arch, &"arm64".into(), &"aarch64".into()).unwrap());
        assert!(!schema.match_value(&arch, &"x86".into(), &"amd64".into()).unwrap());
    }

    #[test]
    fn test_arch_prefers_native_over_emulated() {
        let best = schema()
            .disambiguate(&arch_attribute(), Some(&"amd64".into()), &values(&["x86", "x86_64"]))
            .unwrap();
        assert_eq!(best, values(&["x86_64"]));
    }

    #[test]
    fn test_unrequested_prefers_host() {
        let schema = schema();
        let best = schema
            .disambiguate(&os_attribute(), None, &values(&["windows", "linux", "darwin"]))
            .unwrap();
        assert_eq!(best, values(&["linux"]));

        let best = schema
            .disambiguate(&arch_attribute(), None, &values(&["aarch64", "amd64"]))
            .unwrap();
        assert_eq!(best, values(&["amd64"]));
    }

    #[test]
    fn test_no_preferred_value_keeps_all() {
        let best = schema()
            .disambiguate(&os_attribute(), None, &values(&["windows", "macos"]))
            .unwrap();
        assert_eq!(best, values(&["windows", "macos"]));
    }
}
