use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use logmask_core::Masker;

const LOGIN_EVENT: &str =
    r#"{"loginName":"maskingtest","phoneNumber":"9898981212","password":"Masking@123"}"#;

fn bench_mask(c: &mut Criterion) {
    let masker = Masker::create([
        r#""password":"(.*?)""#,
        r#"("phoneNumber":")(\d+)(")"#,
    ])
    .expect("benchmark rules compile");

    c.bench_function("mask_login_event", |b| {
        b.iter(|| masker.mask(black_box(LOGIN_EVENT)))
    });

    let clean = "GET /health 200 3ms";
    c.bench_function("mask_no_match", |b| b.iter(|| masker.mask(black_box(clean))));
}

criterion_group!(benches, bench_mask);
criterion_main!(benches);
