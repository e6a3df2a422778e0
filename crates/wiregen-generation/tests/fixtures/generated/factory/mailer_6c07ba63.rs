//! Factory for "Mailer". Generated by wiregen; do not edit.

use wiregen_di::{ConstructorArgs, DiResult, Factory, InjectionContext, Instance, Options};

pub struct MailerFactory;

impl Factory for MailerFactory {
    fn create(&self, ctx: &InjectionContext<'_>, options: &Options) -> DiResult<Instance> {
        let args = ConstructorArgs::new("Mailer")
            .with(
                "host",
                options.resolve_or("host", || Ok(::wiregen_di::Argument::Value(::serde_json::Value::String(::std::string::String::from("smtp\"; panic!()")))))?,
            )
            .with(
                "port",
                options.resolve_or("port", || Ok(::wiregen_di::Argument::Value(::serde_json::Value::from(25_i64))))?,
            )
            .with(
                "clock",
                options.resolve_or("clock", || Ok(ctx.lookup("Clock").map(::wiregen_di::Argument::Instance)?))?,
            )
            .with(
                "logger",
                options.resolve_or("logger", || Ok(ctx.instantiate(::wiregen_di::ConstructorArgs::new("FileLogger").with("path", ::wiregen_di::Argument::Value(::serde_json::Value::String(::std::string::String::from("/var/log/app.log"))))).map(::wiregen_di::Argument::Instance)?))?,
            )
            .with(
                "tags",
                options.resolve_or("tags", || Ok(::wiregen_di::Argument::Value(::serde_json::Value::Object([(::std::string::String::from("labels"), ::serde_json::Value::Array(::std::vec![::serde_json::Value::String(::std::string::String::from("ops")), ::serde_json::Value::from(1_i64)]))].into_iter().collect::<::serde_json::Map<::std::string::String, ::serde_json::Value>>()))))?,
            );
        ctx.instantiate(args)
    }
}
