use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kson::{decode_str, from_str, to_string};
use serde::{Deserialize, Serialize};

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
}

#[derive(Serialize, Deserialize, Clone)]
struct Config {
    log: String,
    listen: u16,
    roles: Vec<Role>,
    db: Database,
}

#[derive(Serialize, Deserialize, Clone)]
struct Role {
    name: String,
    allow: Vec<String>,
    deny: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Database {
    host: String,
    port: u16,
    query: String,
}

fn sample_user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn sample_config() -> Config {
    Config {
        log: "debug".to_string(),
        listen: 8000,
        roles: (0..4)
            .map(|i| Role {
                name: format!("role{}", i),
                allow: vec!["/user".to_string(), "/order".to_string()],
                deny: vec!["/user/delete".to_string()],
            })
            .collect(),
        db: Database {
            host: "127.0.0.1".to_string(),
            port: 5432,
            query: "select *\nfrom orders\nwhere id = \"1\"".to_string(),
        },
    }
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = sample_user();

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let kson = "{\n\tid:123\n\tname:Alice\n\temail:alice@example.com\n\tactive:true\n}\n";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(kson)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect();
        let kson = to_string(&products).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &kson, |b, kson| {
            b.iter(|| from_str::<Vec<Product>>(black_box(kson)))
        });
    }
    group.finish();
}

fn benchmark_config_document(c: &mut Criterion) {
    let config = sample_config();
    let kson = to_string(&config).unwrap();

    let mut group = c.benchmark_group("config_document");

    group.bench_function("serialize", |b| b.iter(|| to_string(black_box(&config))));

    group.bench_function("decode", |b| b.iter(|| decode_str(black_box(&kson))));

    group.bench_function("deserialize", |b| {
        b.iter(|| from_str::<Config>(black_box(&kson)))
    });

    group.finish();
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let numbers: Vec<i32> = (0..100).collect();
    let bools: Vec<bool> = (0..100).map(|i| i % 2 == 0).collect();
    let floats: Vec<f64> = (0..100).map(|i| i as f64 * 1.5).collect();

    group.bench_function("serialize_integers", |b| {
        b.iter(|| to_string(black_box(&numbers)))
    });

    group.bench_function("serialize_floats", |b| {
        b.iter(|| to_string(black_box(&floats)))
    });

    let numbers_kson = to_string(&numbers).unwrap();
    let bools_kson = to_string(&bools).unwrap();
    let floats_kson = to_string(&floats).unwrap();

    group.bench_function("deserialize_integers", |b| {
        b.iter(|| from_str::<Vec<i32>>(black_box(&numbers_kson)))
    });

    group.bench_function("deserialize_booleans", |b| {
        b.iter(|| from_str::<Vec<bool>>(black_box(&bools_kson)))
    });

    group.bench_function("deserialize_floats", |b| {
        b.iter(|| from_str::<Vec<f64>>(black_box(&floats_kson)))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let config = sample_config();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("kson_serialize", |b| {
        b.iter(|| kson::to_string(black_box(&config)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&config)))
    });

    let kson_str = kson::to_string(&config).unwrap();
    let json_str = serde_json::to_string(&config).unwrap();

    group.bench_function("kson_deserialize", |b| {
        b.iter(|| kson::from_str::<Config>(black_box(&kson_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Config>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_config_document,
    benchmark_primitive_array,
    benchmark_comparison_with_json
);
criterion_main!(benches);
