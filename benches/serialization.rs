use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_zoon::{from_str, to_string, to_string_with_options, ZoonOptions};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
    category: String,
}

#[derive(Serialize, Deserialize, Clone)]
struct Service {
    name: String,
    infrastructure: Infrastructure,
}

#[derive(Serialize, Deserialize, Clone)]
struct Infrastructure {
    postgres: Health,
    redis: Health,
}

#[derive(Serialize, Deserialize, Clone)]
struct Health {
    state: String,
    latency_ms: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Deployment {
    id: u32,
    environment: Environment,
}

#[derive(Serialize, Deserialize, Clone)]
struct Environment {
    region: String,
    replicas: u32,
    canary: bool,
}

fn products(size: u32) -> Vec<Product> {
    const CATEGORIES: [&str; 3] = ["hardware", "software", "services"];
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
            category: CATEGORIES[i as usize % 3].to_string(),
        })
        .collect()
}

fn services(size: u32) -> Vec<Service> {
    (0..size)
        .map(|i| Service {
            name: format!("svc-{}", i),
            infrastructure: Infrastructure {
                postgres: Health {
                    state: if i % 4 == 0 { "down" } else { "up" }.to_string(),
                    latency_ms: i % 50,
                },
                redis: Health {
                    state: "up".to_string(),
                    latency_ms: i % 7,
                },
            },
        })
        .collect()
}

fn benchmark_serialize_inline(c: &mut Criterion) {
    let deployment = Deployment {
        id: 42,
        environment: Environment {
            region: "us-east-1".to_string(),
            replicas: 3,
            canary: false,
        },
    };

    c.bench_function("serialize_inline_record", |b| {
        b.iter(|| to_string(black_box(&deployment)))
    });
}

fn benchmark_deserialize_inline(c: &mut Criterion) {
    let zoon = "id:42 environment:{region=us-east-1 replicas:3 canary:n}";

    c.bench_function("deserialize_inline_record", |b| {
        b.iter(|| from_str::<Deployment>(black_box(zoon)))
    });
}

fn benchmark_serialize_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_tabular");

    for size in [10, 50, 100, 500].iter() {
        let rows = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&rows)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_tabular");

    for size in [10, 50, 100, 500].iter() {
        let zoon = to_string(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &zoon, |b, zoon| {
            b.iter(|| from_str::<Vec<Product>>(black_box(zoon)))
        });
    }
    group.finish();
}

fn benchmark_nested_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_columns");
    let rows = services(200);
    let zoon = to_string(&rows).unwrap();

    group.bench_function("serialize_with_aliases", |b| {
        b.iter(|| to_string(black_box(&rows)))
    });

    group.bench_function("serialize_verbatim", |b| {
        b.iter(|| to_string_with_options(black_box(&rows), ZoonOptions::verbatim()))
    });

    group.bench_function("deserialize", |b| {
        b.iter(|| from_str::<Vec<Service>>(black_box(&zoon)))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let users: Vec<User> = (1..=100)
        .map(|i| User {
            id: i,
            name: format!("User {}", i),
            email: format!("user{}@example.com", i),
            active: i % 3 != 0,
        })
        .collect();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("zoon_serialize", |b| {
        b.iter(|| serde_zoon::to_string(black_box(&users)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&users)))
    });

    let zoon_str = serde_zoon::to_string(&users).unwrap();
    let json_str = serde_json::to_string(&users).unwrap();

    group.bench_function("zoon_deserialize", |b| {
        b.iter(|| serde_zoon::from_str::<Vec<User>>(black_box(&zoon_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Vec<User>>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let rows = products(100);

    c.bench_function("roundtrip_tabular", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&rows)).unwrap();
            let _deserialized: Vec<Product> = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_inline,
    benchmark_deserialize_inline,
    benchmark_serialize_tabular,
    benchmark_deserialize_tabular,
    benchmark_nested_columns,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
