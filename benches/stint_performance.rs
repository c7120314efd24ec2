use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stintlab::session::{DeclaredStint, RaceResult, RawLap};
use stintlab::{
    AnalysisOptions, Compound, RowOrder, SessionData, SessionRecord, SortDirection, SortKey,
    aggregate_session, analyze_session,
};
use std::time::Duration;

const DRIVERS: [&str; 20] = [
    "VER", "PER", "HAM", "RUS", "LEC", "SAI", "NOR", "PIA", "ALO", "STR", "GAS", "OCO", "ALB",
    "SAR", "TSU", "RIC", "BOT", "ZHO", "HUL", "MAG",
];

/// A 60-lap race, every driver on a three-stop strategy
fn create_sample_session() -> SessionData {
    let mut records = Vec::new();
    let compounds = [Compound::Soft, Compound::Medium, Compound::Hard, Compound::Medium];
    for (idx, driver) in DRIVERS.iter().enumerate() {
        for (stint, compound) in compounds.iter().enumerate() {
            let start = stint as u32 * 15 + 1;
            records.push(SessionRecord::Stint(DeclaredStint::new(
                driver,
                *compound,
                start,
                start + 14,
            )));
        }
        for lap in 1..=60u32 {
            let tire_age = ((lap - 1) % 15) as f64;
            let time = 92.0 + idx as f64 * 0.05 + tire_age * 0.08;
            records.push(SessionRecord::Lap(RawLap::timed(driver, lap, time)));
        }
        records.push(SessionRecord::Result(RaceResult::classified(
            driver,
            (DRIVERS.len() - idx) as u32,
        )));
    }
    SessionData::from_records(records)
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    let session = create_sample_session();

    group.bench_function("aggregate_session", |b| {
        b.iter(|| black_box(aggregate_session(black_box(&session))));
    });

    group.bench_function("analyze_race_order", |b| {
        let options = AnalysisOptions::default();
        b.iter(|| black_box(analyze_session(black_box(&session), &options)));
    });

    group.bench_function("analyze_sorted_by_degradation", |b| {
        let options = AnalysisOptions {
            order: RowOrder::Column(SortKey::Degradation, SortDirection::Descending),
        };
        b.iter(|| black_box(analyze_session(black_box(&session), &options)));
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    let rows = aggregate_session(&create_sample_session());

    group.bench_function("serialize_records", |b| {
        b.iter(|| {
            for row in &rows {
                black_box(serde_json::to_string(row).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = bench_aggregation, bench_serialization
}
criterion_main!(benches);
