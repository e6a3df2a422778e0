//! Factory for {{type_literal}}. Generated by wiregen; do not edit.

use wiregen_di::{ConstructorArgs, DiResult, Factory, InjectionContext, Instance, Options};

pub struct {{struct_name}};

impl Factory for {{struct_name}} {
    fn create(&self, ctx: &InjectionContext<'_>, {{options_binding}}: &Options) -> DiResult<Instance> {
        let args = ConstructorArgs::new({{concrete_literal}}){{#each arguments}}
            .with(
                {{name}},
                options.resolve_or({{name}}, || Ok({{expr}}))?,
            ){{/each}};
        ctx.instantiate(args)
    }
}
