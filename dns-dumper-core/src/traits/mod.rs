//! Collaborator abstraction trait definition

mod resolver;

pub use resolver::{DnsResolver, ResolveFailure};
