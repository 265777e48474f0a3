//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_identity_repository;
mod in_memory_tenant_config_repository;
mod in_memory_usage_repository;
mod redis_usage_repository;

pub use in_memory_identity_repository::InMemoryIdentityRepository;
pub use in_memory_tenant_config_repository::InMemoryTenantConfigRepository;
pub use in_memory_usage_repository::InMemoryUsageRepository;
pub use redis_usage_repository::RedisUsageRepository;
