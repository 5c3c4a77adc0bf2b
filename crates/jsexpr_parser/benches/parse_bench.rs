//! Parser benchmarks over representative expression fixtures.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsexpr_parser::{basic_parser, esnext_parser, PresetOptions};

const SIMPLE: &str = "a + b * c - d / e";
const MEMBER_HEAVY: &str = "obj.aaa.bbb[ccc].ddd(e, f.g, h[i]).jjj";
const MIXED: &str =
    "r = { a, ...rest, [key]: val ** 2 }, f = (x, y = 1, ...z) => x + y + z.length, \
     f(one?.two?.three ?? fallback, `tpl ${a + b} end`)";

fn bench_parse(c: &mut Criterion) {
    let esnext = esnext_parser(PresetOptions::default());
    let basic = basic_parser();

    let mut group = c.benchmark_group("parse");
    group.bench_function("esnext_simple", |b| {
        b.iter(|| esnext.parse(black_box(SIMPLE)).unwrap())
    });
    group.bench_function("esnext_member_heavy", |b| {
        b.iter(|| esnext.parse(black_box(MEMBER_HEAVY)).unwrap())
    });
    group.bench_function("esnext_mixed", |b| {
        b.iter(|| esnext.parse(black_box(MIXED)).unwrap())
    });
    group.bench_function("basic_simple", |b| {
        b.iter(|| basic.parse(black_box(SIMPLE)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
