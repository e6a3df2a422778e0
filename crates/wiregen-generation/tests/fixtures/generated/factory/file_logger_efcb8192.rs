//! Factory for "FileLogger". Generated by wiregen; do not edit.

use wiregen_di::{ConstructorArgs, DiResult, Factory, InjectionContext, Instance, Options};

pub struct FileLoggerFactory;

impl Factory for FileLoggerFactory {
    fn create(&self, ctx: &InjectionContext<'_>, options: &Options) -> DiResult<Instance> {
        let args = ConstructorArgs::new("FileLogger")
            .with(
                "path",
                options.resolve_or("path", || Ok(::wiregen_di::Argument::Value(::serde_json::Value::String(::std::string::String::from("/var/log/app.log")))))?,
            );
        ctx.instantiate(args)
    }
}
