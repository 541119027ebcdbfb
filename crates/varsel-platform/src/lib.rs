//! Built-in `os` and `arch` attributes.
//!
//! Variants published for several platforms name them inconsistently
//! (`aarch64` and `arm64`, `darwin` and `macos`). The rules installed by
//! [`Platform::register`] compare canonical values, accept 32-bit variants on
//! the matching 64-bit host, and prefer the host platform when the consumer
//! did not ask for one.
//!
//! # Example
//!
//! ```
//! use varsel_platform::{Arch, OS, Platform};
//! use varsel_schema::Schema;
//!
//! let host = Platform::new(OS::Linux, Arch::X86_64);
//! let schema = host.register(Schema::builder()).build()?;
//! assert!(schema.get_attribute("arch").is_some());
//! # Ok::<(), varsel_schema::SchemaError>(())
//! ```

pub use self::arch::Arch;
pub use self::error::Error;
pub use self::os::OS;
pub use self::platform::{ARCH_ATTRIBUTE, OS_ATTRIBUTE, Platform, arch_attribute, os_attribute};

pub mod arch;
mod error;
pub mod os;
mod platform;
