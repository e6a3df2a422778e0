//! Factory map. Generated by wiregen; do not edit.

use std::sync::Arc;

use wiregen_di::{Factory, FactorySource};

/// Type name and factory source of every generated factory
pub fn factories() -> Vec<(&'static str, FactorySource)> {
    vec![{{#each entries}}
        (
            {{type_literal}},
            FactorySource::constructor(|| -> Arc<dyn Factory> { Arc::new(super::{{module}}::{{struct_name}}) }),
        ),{{/each}}
    ]
}
