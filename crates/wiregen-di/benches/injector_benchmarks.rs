//! Performance benchmarks for plan resolution and injection

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::sync::Arc;
use wiregen_di::{
    ClassCatalog, ConfigStore, ContainerStrategy, FactorySource, Injector, InjectorBuilder,
    Options, Parameter, PlanFactory, RuntimeInjector,
};

/// Simple service graph for benchmarking
struct Pool {
    size: u32,
}

struct Repository {
    pool: Arc<Pool>,
}

fn catalog() -> ClassCatalog {
    let mut catalog = ClassCatalog::new();
    catalog
        .class(
            "Pool",
            vec![Parameter::builtin("size", "int").with_default(json!(4))],
            |args| Ok(Arc::new(Pool { size: args.value("size")? })),
        )
        .expect("pool definition")
        .class("Repository", vec![Parameter::object("pool", "Pool")], |args| {
            Ok(Arc::new(Repository {
                pool: args.instance("pool")?,
            }))
        })
        .expect("repository definition");
    catalog.interface("Store");
    catalog
}

fn config() -> ConfigStore {
    let mut config = ConfigStore::new();
    config
        .set_alias("repo", "Repository")
        .set_type_preference("Store", "Repository", None);
    config
}

fn benchmark_resolution(c: &mut Criterion) {
    let resolver = InjectorBuilder::from_catalog(catalog())
        .config(config())
        .build_resolver()
        .expect("resolver");

    c.bench_function("resolve_concrete", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("Repository"), None, &Options::new())))
    });

    c.bench_function("resolve_alias", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("repo"), None, &Options::new())))
    });

    c.bench_function("resolve_preference", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("Store"), None, &Options::new())))
    });
}

fn benchmark_injection(c: &mut Criterion) {
    let catalog = Arc::new(catalog());
    let autowiring = Arc::new(
        InjectorBuilder::new(catalog.clone())
            .config(config())
            .build()
            .expect("injector"),
    );
    let plan = autowiring
        .resolver()
        .resolve("Repository", None, &Options::new())
        .expect("plan");
    let precompiled = RuntimeInjector::new(
        [("Repository", FactorySource::instance(PlanFactory::new(plan)))],
        autowiring.clone(),
        catalog,
        ContainerStrategy::SelfAsContainer,
    );

    c.bench_function("create_autowired", |b| {
        b.iter(|| {
            let repository = autowiring.create(black_box("Repository"), &Options::new());
            black_box(repository)
        })
    });

    c.bench_function("create_precompiled", |b| {
        b.iter(|| {
            let repository = precompiled.create(black_box("Repository"), &Options::new());
            black_box(repository)
        })
    });

    c.bench_function("create_with_options", |b| {
        let options = Options::new().with("size", json!(16));
        b.iter(|| black_box(autowiring.create(black_box("Pool"), &options)))
    });
}

fn benchmark_pool_size(c: &mut Criterion) {
    let injector = InjectorBuilder::from_catalog(catalog())
        .build()
        .expect("injector");

    c.bench_function("downcast_instance", |b| {
        b.iter(|| {
            let repository = injector
                .create("Repository", &Options::new())
                .ok()
                .and_then(|instance| instance.downcast::<Repository>().ok());
            black_box(repository.map(|r| r.pool.size))
        })
    });
}

criterion_group!(
    benches,
    benchmark_resolution,
    benchmark_injection,
    benchmark_pool_size
);
criterion_main!(benches);
