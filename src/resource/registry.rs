//! Resource Registry
//!
//! Process-wide lookup from type names to the resource and data-source
//! implementations this provider ships.

use super::branch_protection_rules::BranchProtectionRules;
use super::dependabot_secret::DependabotSecret;
use super::{DataSource, ManagedResource};
use std::collections::HashMap;
use std::sync::OnceLock;

/// All registered components, keyed by type name.
pub struct ProviderRegistry {
    resources: HashMap<&'static str, Box<dyn ManagedResource>>,
    data_sources: HashMap<&'static str, Box<dyn DataSource>>,
}

static REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

/// Get the registry (built on first access)
pub fn get_registry() -> &'static ProviderRegistry {
    REGISTRY.get_or_init(|| {
        let mut resources: HashMap<&'static str, Box<dyn ManagedResource>> = HashMap::new();
        let secret = DependabotSecret;
        resources.insert(secret.type_name(), Box::new(secret));

        let mut data_sources: HashMap<&'static str, Box<dyn DataSource>> = HashMap::new();
        let rules = BranchProtectionRules;
        data_sources.insert(rules.type_name(), Box::new(rules));

        ProviderRegistry {
            resources,
            data_sources,
        }
    })
}

/// Get a resource implementation by type name
pub fn get_resource(key: &str) -> Option<&'static dyn ManagedResource> {
    get_registry().resources.get(key).map(|r| r.as_ref())
}

/// Get a data-source implementation by type name
pub fn get_data_source(key: &str) -> Option<&'static dyn DataSource> {
    get_registry().data_sources.get(key).map(|d| d.as_ref())
}

/// All resource type names
pub fn resource_type_names() -> Vec<&'static str> {
    get_registry().resources.keys().copied().collect()
}

/// All data-source type names
pub fn data_source_type_names() -> Vec<&'static str> {
    get_registry().data_sources.keys().copied().collect()
}
