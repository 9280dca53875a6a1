use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tracker_core::{
    calendar::{Month, Quarter, QuarterWindow},
    tracker::{month_spend, quarter_spend, ClientBudget, SpendRecord, TrackerSession},
};

fn sample_records(count: usize) -> Vec<SpendRecord> {
    (0..count)
        .map(|idx| {
            let month = Month::ALL[idx % Month::ALL.len()];
            SpendRecord::new(month.name(), 50.0 + (idx % 100) as f64)
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let records = sample_records(10_000);
    let window = QuarterWindow::for_quarter(Quarter::Q2);

    c.bench_function("month_spend_10k", |b| {
        b.iter(|| month_spend(black_box(&records), Month::May))
    });

    c.bench_function("quarter_spend_10k", |b| {
        b.iter(|| quarter_spend(black_box(&records), &window))
    });

    let client = ClientBudget {
        code: "BENCH".into(),
        name: "Bench".into(),
        committed_monthly: 25_000.0,
        rollover_credit: 0.0,
        quarter_label: Quarter::Q2,
    };
    let today = NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date");
    c.bench_function("session_swipe_cycle_10k", |b| {
        let mut session = TrackerSession::open(client.clone(), records.clone(), today);
        b.iter(|| {
            session.swipe(100.0, 50.0);
            session.swipe(-100.0, 50.0);
        })
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
