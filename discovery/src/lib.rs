//! Service discovery and cross-service authorization plumbing.
//!
//! Every non-auth service uses the same two pieces before honoring a
//! request:
//! - a [`ServiceLocator`] that maps a logical service name to a live base
//!   URL (Consul-backed in production, a static map in tests), and
//! - an [`AuthClient`] that presents the caller's token to the credential
//!   verifier and recovers `{username, role}`.
//!
//! Transport failures never escape the [`AuthClient`]: anything short of a
//! positive verification is an explicit rejection the calling endpoint turns
//! into a 401, not a 500.

pub mod auth_client;
pub mod consul;
pub mod errors;
pub mod locator;

pub use auth_client::AuthClient;
pub use auth_client::AuthzError;
pub use auth_client::Verified;
pub use consul::ConsulAgent;
pub use consul::ServiceRegistration;
pub use errors::DiscoveryError;
pub use locator::ConsulLocator;
pub use locator::ServiceLocator;
pub use locator::StaticLocator;
