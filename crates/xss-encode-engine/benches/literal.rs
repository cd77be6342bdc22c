use criterion::{Criterion, criterion_group, criterion_main};
use xss_encode_engine::Codec;

fn bench_literal_decoders(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal");
    group.sample_size(10);

    let payload = "SELECT * FROM users WHERE name = 'administrator' -- ".repeat(20);
    let oracle = format!(
        "x = {} AND y = {}",
        Codec::OracleChr.convert(&payload).unwrap_or_default(),
        Codec::OracleChr.convert("tail").unwrap_or_default()
    );
    let php = Codec::PhpChr.convert(&payload).unwrap_or_default();

    group.bench_function("oracle_unchr", |b| {
        b.iter(|| Codec::OracleUnchr.convert(std::hint::black_box(&oracle)))
    });

    group.bench_function("php_unchr", |b| {
        b.iter(|| Codec::PhpUnchr.convert(std::hint::black_box(&php)))
    });

    group.bench_function("oracle_chr", |b| {
        b.iter(|| Codec::OracleChr.convert(std::hint::black_box(&payload)))
    });

    group.finish();
}

criterion_group!(benches, bench_literal_decoders);
criterion_main!(benches);
