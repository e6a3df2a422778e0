//! The checked-in tree under `fixtures/generated` is what the generator emits
//! for the catalog below. Compiling it into this test crate and running it
//! shows the emitted source is valid Rust that behaves like the runtime path.

use std::sync::Arc;

use serde_json::{json, Value};
use wiregen_di::*;
use wiregen_generation::naming::DEFAULT_NAMESPACE;
use wiregen_generation::{InjectorGenerator, MemorySink, NullLogger};

#[path = "fixtures/generated/mod.rs"]
mod generated;

const FIXTURES: &[(&str, &str)] = &[
    ("mod.rs", include_str!("fixtures/generated/mod.rs")),
    ("factories.rs", include_str!("fixtures/generated/factories.rs")),
    (
        "generated_injector.rs",
        include_str!("fixtures/generated/generated_injector.rs"),
    ),
    (
        "factory/clock_93ff9273.rs",
        include_str!("fixtures/generated/factory/clock_93ff9273.rs"),
    ),
    (
        "factory/file_logger_efcb8192.rs",
        include_str!("fixtures/generated/factory/file_logger_efcb8192.rs"),
    ),
    (
        "factory/mailer_6c07ba63.rs",
        include_str!("fixtures/generated/factory/mailer_6c07ba63.rs"),
    ),
    (
        "factory/mailer_2e4330b8.rs",
        include_str!("fixtures/generated/factory/mailer_2e4330b8.rs"),
    ),
];

const HOST: &str = "smtp\"; panic!()";

#[derive(Debug)]
struct Clock;

#[derive(Debug)]
struct FileLogger {
    path: String,
}

#[derive(Debug)]
struct Mailer {
    host: String,
    port: u16,
    clock: Arc<Clock>,
    logger: Arc<FileLogger>,
    tags: Value,
}

fn catalog() -> Arc<ClassCatalog> {
    let mut catalog = ClassCatalog::new();
    catalog.interface("Logger");
    catalog
        .class("Clock", vec![], |_| Ok(Arc::new(Clock)))
        .unwrap()
        .class(
            "FileLogger",
            vec![Parameter::builtin("path", "string").with_default(json!("/var/log/app.log"))],
            |args| Ok(Arc::new(FileLogger { path: args.value("path")? })),
        )
        .unwrap()
        .class(
            "Mailer",
            vec![
                Parameter::builtin("host", "string"),
                Parameter::builtin("port", "int").with_default(json!(25)),
                Parameter::object("clock", "Clock"),
                Parameter::object("logger", "Logger"),
                Parameter::builtin("tags", "array").with_default(json!({"labels": ["ops", 1]})),
            ],
            |args| {
                Ok(Arc::new(Mailer {
                    host: args.value("host")?,
                    port: args.value("port")?,
                    clock: args.instance("clock")?,
                    logger: args.instance("logger")?,
                    tags: args.value("tags")?,
                }))
            },
        )
        .unwrap();
    Arc::new(catalog)
}

fn config() -> ConfigStore {
    let mut config = ConfigStore::new();
    config
        .set_type_preference("Logger", "FileLogger", None)
        .set_parameter("Mailer", "host", json!(HOST))
        .set_alias("mailer", "Mailer")
        .set_parameter("mailer", "port", json!(2525));
    config
}

fn strip_whitespace(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

fn runtime_injector() -> Arc<AutowiringInjector> {
    Arc::new(
        InjectorBuilder::new(catalog())
            .config(config())
            .build()
            .unwrap(),
    )
}

fn mailer(injector: &dyn Injector, name: &str, options: &Options) -> Arc<Mailer> {
    injector
        .create(name, options)
        .unwrap()
        .downcast::<Mailer>()
        .unwrap()
}

#[test]
fn test_fixture_matches_generator_output() {
    let resolver = InjectorBuilder::new(catalog())
        .config(config())
        .build_resolver()
        .unwrap();
    let generator = InjectorGenerator::new(resolver)
        .unwrap()
        .with_logger(Arc::new(NullLogger));
    assert_eq!(generator.namespace(), DEFAULT_NAMESPACE);

    let mut sink = MemorySink::new();
    let report = generator
        .generate(&["Clock", "FileLogger", "Mailer"], &mut sink)
        .unwrap();

    assert_eq!(
        report.generated_types(),
        vec!["Clock", "FileLogger", "Mailer", "mailer"]
    );
    for (path, fixture) in FIXTURES {
        let emitted = sink.get(path).unwrap_or_else(|| panic!("{} not emitted", path));
        assert_eq!(strip_whitespace(emitted), strip_whitespace(fixture), "{}", path);
    }
}

#[test]
fn test_generated_injector_builds_services() {
    let catalog = catalog();
    let injector = generated::generated_injector(
        runtime_injector(),
        catalog,
        ContainerStrategy::SelfAsContainer,
    );

    for name in ["Clock", "FileLogger", "Mailer", "mailer"] {
        assert!(injector.has_factory(name), "{}", name);
    }

    let concrete = mailer(&injector, "Mailer", &Options::new());
    assert_eq!(concrete.host, HOST);
    assert_eq!(concrete.port, 25);
    assert_eq!(concrete.logger.path, "/var/log/app.log");
    assert_eq!(concrete.tags, json!({"labels": ["ops", 1]}));

    let aliased = mailer(&injector, "mailer", &Options::new());
    assert_eq!(aliased.host, HOST);
    assert_eq!(aliased.port, 2525);

    let overridden = mailer(&injector, "mailer", &Options::new().with("port", json!(587)));
    assert_eq!(overridden.port, 587);

    assert!(injector
        .create("Clock", &Options::new())
        .unwrap()
        .downcast::<Clock>()
        .is_ok());
}

#[test]
fn test_generated_and_runtime_paths_agree() {
    let runtime = runtime_injector();
    let injector = generated::generated_injector(
        runtime.clone(),
        catalog(),
        ContainerStrategy::SelfAsContainer,
    );

    for name in ["Mailer", "mailer"] {
        let generated = mailer(&injector, name, &Options::new());
        let autowired = mailer(runtime.as_ref(), name, &Options::new());

        assert_eq!(generated.host, autowired.host);
        assert_eq!(generated.port, autowired.port);
        assert_eq!(generated.logger.path, autowired.logger.path);
        assert_eq!(generated.tags, autowired.tags);
    }
}
