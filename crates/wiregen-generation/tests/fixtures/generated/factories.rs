//! Factory map. Generated by wiregen; do not edit.

use std::sync::Arc;

use wiregen_di::{Factory, FactorySource};

/// Type name and factory source of every generated factory
pub fn factories() -> Vec<(&'static str, FactorySource)> {
    vec![
        (
            "Clock",
            FactorySource::constructor(|| -> Arc<dyn Factory> { Arc::new(super::clock_93ff9273::ClockFactory) }),
        ),
        (
            "FileLogger",
            FactorySource::constructor(|| -> Arc<dyn Factory> { Arc::new(super::file_logger_efcb8192::FileLoggerFactory) }),
        ),
        (
            "Mailer",
            FactorySource::constructor(|| -> Arc<dyn Factory> { Arc::new(super::mailer_6c07ba63::MailerFactory) }),
        ),
        (
            "mailer",
            FactorySource::constructor(|| -> Arc<dyn Factory> { Arc::new(super::mailer_2e4330b8::MailerFactory) }),
        ),
    ]
}
