//! Error types for the runtime, grouped per domain.

mod discovery;
mod extension;
mod host;
mod registry;

pub use discovery::DiscoveryError;
pub use extension::ExtensionError;
pub use host::HostError;
pub use registry::RegistryError;
