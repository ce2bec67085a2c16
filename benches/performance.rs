use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use proration_core::calendar::SettlementDate;
use proration_core::config::{Config, ConfigManager};
use proration_core::proration::{prorate, prorate_amount_text, prorate_settlement};
use proration_core::report::{to_json, ReportFormatter};
use tempfile::tempdir;

fn sample_dates(count: usize) -> Vec<SettlementDate> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|idx| SettlementDate::from(start + Duration::days((idx % 731) as i64)))
        .collect()
}

fn bench_prorate(c: &mut Criterion) {
    let dates = sample_dates(black_box(10_000));

    c.bench_function("prorate_10k_dates", |b| {
        b.iter(|| {
            for date in &dates {
                black_box(prorate(*date, black_box(123_457.0)));
            }
        })
    });

    c.bench_function("prorate_amount_text_10k", |b| {
        b.iter(|| {
            for date in &dates {
                black_box(prorate_amount_text(*date, black_box("1,234,567")));
            }
        })
    });
}

fn bench_report(c: &mut Criterion) {
    let date = SettlementDate::new(2025, 1, 11).unwrap();
    let settlement = prorate_settlement(date, 10_000.0, 15_000.0);
    let formatter = ReportFormatter::from_config(&Config::default());

    c.bench_function("render_report", |b| {
        b.iter(|| black_box(formatter.render(&settlement)))
    });

    c.bench_function("report_json", |b| {
        b.iter(|| black_box(to_json(&settlement).expect("json")))
    });
}

fn bench_config_io(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    c.bench_function("config_save_load", |b| {
        b.iter_batched(
            Config::default,
            |config| {
                manager.save(&config).expect("save");
                black_box(manager.load().expect("load"));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_prorate, bench_report, bench_config_io);
criterion_main!(benches);
