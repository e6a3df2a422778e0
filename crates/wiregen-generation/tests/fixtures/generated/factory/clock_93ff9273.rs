//! Factory for "Clock". Generated by wiregen; do not edit.

use wiregen_di::{ConstructorArgs, DiResult, Factory, InjectionContext, Instance, Options};

pub struct ClockFactory;

impl Factory for ClockFactory {
    fn create(&self, ctx: &InjectionContext<'_>, _options: &Options) -> DiResult<Instance> {
        let args = ConstructorArgs::new("Clock");
        ctx.instantiate(args)
    }
}
