use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ganji_chart::{ChartRequest, chart, chart_with_table};
use ganji_table::{ReferenceTable, TableFormat};
use ganji_time::{CivilDate, ClockTime};

const TABLE: &str = "\
2024-02-03, 2023-12-24, 癸卯, 乙丑, 乙未
2024-02-04, 2023-12-25, 甲辰, 丙寅, 丙申, 17:27
2024-02-05, 2023-12-26, 甲辰, 丙寅, 丁酉
";

fn chart_bench(c: &mut Criterion) {
    let rules_req = ChartRequest::solar(
        CivilDate::new(1971, 7, 7).unwrap(),
        ClockTime::new(23, 40).unwrap(),
    );
    let table_req = ChartRequest::solar(
        CivilDate::new(2024, 2, 4).unwrap(),
        ClockTime::new(9, 0).unwrap(),
    );
    let table = ReferenceTable::parse(TABLE, TableFormat::Text).unwrap();

    let mut group = c.benchmark_group("chart");
    group.bench_function("rules", |b| b.iter(|| chart(black_box(&rules_req), None)));
    group.bench_function("table_overlay", |b| {
        b.iter(|| chart_with_table(black_box(&table_req), &table))
    });
    group.finish();
}

criterion_group!(benches, chart_bench);
criterion_main!(benches);
