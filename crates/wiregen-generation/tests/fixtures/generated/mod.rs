//! Module map of the generated code. Generated by wiregen; do not edit.

#[path = "factories.rs"]
pub mod factories;
#[path = "generated_injector.rs"]
pub mod generated_injector;

#[path = "factory/clock_93ff9273.rs"]
pub mod clock_93ff9273;

#[path = "factory/file_logger_efcb8192.rs"]
pub mod file_logger_efcb8192;

#[path = "factory/mailer_6c07ba63.rs"]
pub mod mailer_6c07ba63;

#[path = "factory/mailer_2e4330b8.rs"]
pub mod mailer_2e4330b8;

pub use generated_injector::generated_injector;
