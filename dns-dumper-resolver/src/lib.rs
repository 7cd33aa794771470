//! Resolver backends for DNS Dumper
//!
//! Implementations of [`dns_dumper_core::DnsResolver`]:
//! - [`HickoryResolver`]: in-process lookups through hickory-resolver
//! - [`DigResolver`]: runs the `dig` utility, one process per lookup
//!
//! Both query a single nameserver (or the system configuration) and never
//! retry on their own.

mod error;
mod services;

pub use error::{ResolverError, ResolverResult};
pub use services::{
    build_resolver, parse_nameserver, Backend, DigResolver, HickoryResolver, DEFAULT_NAMESERVER,
};
