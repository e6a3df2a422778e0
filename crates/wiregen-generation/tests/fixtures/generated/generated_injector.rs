//! Injector over the generated factories. Generated by wiregen; do not edit.

use std::sync::Arc;

use wiregen_di::{ContainerStrategy, Injector, Instantiator, RuntimeInjector};

/// Serves every type with a generated factory and hands the rest to `fallback`
pub fn generated_injector(
    fallback: Arc<dyn Injector>,
    instantiator: Arc<dyn Instantiator>,
    container: ContainerStrategy,
) -> RuntimeInjector {
    RuntimeInjector::new(crate::generated::factories::factories(), fallback, instantiator, container)
}
