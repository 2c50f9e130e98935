pub mod normalize;

pub mod resolver_service;
pub use resolver_service::{ResolveError, ResolverService};

pub mod resolver_service_impl;
pub use resolver_service_impl::CachingResolverService;
