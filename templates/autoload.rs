//! Module map of the generated code. Generated by wiregen; do not edit.

#[path = "factories.rs"]
pub mod factories;
#[path = "generated_injector.rs"]
pub mod generated_injector;
{{#each entries}}
#[path = {{path_literal}}]
pub mod {{module}};
{{/each}}
pub use generated_injector::generated_injector;
