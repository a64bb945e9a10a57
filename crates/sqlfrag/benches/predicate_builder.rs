use chrono::{NaiveDate, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlfrag::{Dialect, Entity, EntityQuery, append_predicates, escape_literal};

#[derive(Default, Entity)]
#[orm(table = "t_user")]
struct UserVo {
    id: Option<String>,
    #[orm(like)]
    user_name: Option<String>,
    age: Option<i32>,
    #[orm(between(min = "minCreateTime", max = "maxCreateTime"))]
    create_time: Option<NaiveDateTime>,
    #[orm(transient)]
    min_create_time: Option<NaiveDateTime>,
    #[orm(transient)]
    max_create_time: Option<NaiveDateTime>,
    #[orm(in_list(values = "ids"), column = "id")]
    id_marker: Option<String>,
    #[orm(transient)]
    ids: Vec<String>,
}

fn sample(n: usize) -> UserVo {
    let day = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    UserVo {
        user_name: Some("o'brien".into()),
        age: Some(30),
        min_create_time: Some(day),
        max_create_time: Some(day + chrono::Duration::days(30)),
        ids: (0..n).map(|i| format!("id-{i}")).collect(),
        ..Default::default()
    }
}

fn bench_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicate_builder/append_predicates");

    for n in [1, 10, 100, 500] {
        let vo = sample(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &vo, |b, vo| {
            b.iter(|| {
                let mut sql = String::with_capacity(256);
                let report = append_predicates(vo, &mut sql, Dialect::MySql, &[]).unwrap();
                black_box((sql, report));
            });
        });
    }

    group.finish();
}

fn bench_full_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicate_builder/build");

    for dialect in Dialect::ALL {
        let vo = sample(10);
        group.bench_with_input(BenchmarkId::from_parameter(dialect), &vo, |b, vo| {
            b.iter(|| black_box(EntityQuery::new(vo, dialect).build().unwrap()));
        });
    }

    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicate_builder/escape_literal");

    let clean = "plain value without quotes".repeat(8);
    let dirty = r#"it's a "quoted" \ value"#.repeat(8);
    group.bench_function("clean", |b| b.iter(|| black_box(escape_literal(black_box(&clean)))));
    group.bench_function("dirty", |b| b.iter(|| black_box(escape_literal(black_box(&dirty)))));

    group.finish();
}

criterion_group!(benches, bench_predicates, bench_full_query, bench_escape);
criterion_main!(benches);
