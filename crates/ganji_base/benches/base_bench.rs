use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ganji_base::{
    HourConvention, Pillar, day_pillar, element_counts, hour_branch, hour_pillar, month_pillar,
    year_pillar,
};
use ganji_time::{CivilDate, ClockTime};

fn pillar_rules_bench(c: &mut Criterion) {
    let date = CivilDate::new(1971, 7, 7).unwrap();
    let clock = ClockTime::new(23, 40).unwrap();
    let conv = HourConvention::default();

    let mut group = c.benchmark_group("pillar_rules");
    group.bench_function("year_pillar", |b| b.iter(|| year_pillar(black_box(date))));
    group.bench_function("month_pillar", |b| {
        let stem = year_pillar(date).stem();
        b.iter(|| month_pillar(black_box(date), stem))
    });
    group.bench_function("day_pillar", |b| b.iter(|| day_pillar(black_box(date))));
    group.bench_function("hour_branch", |b| {
        b.iter(|| hour_branch(black_box(clock), &conv))
    });
    group.bench_function("hour_pillar", |b| {
        b.iter(|| hour_pillar(black_box(date), black_box(clock), &conv, day_pillar))
    });
    group.finish();
}

fn element_bench(c: &mut Criterion) {
    let pillars: [Pillar; 4] = ["辛亥", "乙未", "辛卯", "己亥"].map(|p| p.parse().unwrap());
    c.bench_function("element_counts", |b| {
        b.iter(|| element_counts(black_box(pillars)))
    });
}

criterion_group!(benches, pillar_rules_bench, element_bench);
criterion_main!(benches);
