// Criterion benchmarks for Nearby Events

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nearby_events::core::{filter_by_time_of_day, CriteriaBuilder, UpstreamQueryParams};
use nearby_events::models::{SearchForm, TimeOfDay};
use nearby_events::services::normalize_events;
use serde_json::json;

fn create_upstream_body(count: usize) -> String {
    let events: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("evt-{}", i),
                "name": format!("Event {}", i),
                "info": if i % 3 == 0 { json!(null) } else { json!("Live music") },
                "dates": { "start": {
                    "localDate": "2025-04-12",
                    "localTime": format!("{:02}:{:02}:00", i % 24, i % 60)
                } },
                "_embedded": { "venues": [{
                    "name": "Hall",
                    "postalCode": "10001",
                    "location": if i % 10 == 0 {
                        json!(null)
                    } else {
                        json!({
                            "latitude": format!("{}", 40.7 + (i as f64 * 0.001) % 0.5),
                            "longitude": format!("{}", -74.0 + (i as f64 * 0.001) % 0.5)
                        })
                    }
                }] }
            })
        })
        .collect();

    json!({ "_embedded": { "events": events } }).to_string()
}

fn create_form() -> SearchForm {
    SearchForm {
        latitude: Some("40.7128".to_string()),
        longitude: Some("-74.0060".to_string()),
        radius: Some("25".to_string()),
        start_date: Some("2025-04-12".to_string()),
        start_time: Some("18:00".to_string()),
        time_of_day: Some("evening".to_string()),
        category: Some("Music".to_string()),
        ..Default::default()
    }
}

fn bench_build_and_translate(c: &mut Criterion) {
    let builder = CriteriaBuilder::default();
    let form = create_form();

    c.bench_function("build_and_translate", |b| {
        b.iter(|| {
            let criteria = builder.build(black_box(&form)).unwrap();
            UpstreamQueryParams::from_criteria(&criteria, 50).to_pairs()
        });
    });
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_events");

    for count in [20, 50, 200].iter() {
        let body = create_upstream_body(*count);

        group.bench_with_input(BenchmarkId::new("records", count), count, |b, _| {
            b.iter(|| normalize_events(black_box(&body)).unwrap());
        });
    }

    group.finish();
}

fn bench_time_of_day_filter(c: &mut Criterion) {
    let events = normalize_events(&create_upstream_body(200)).unwrap();

    c.bench_function("time_of_day_filter_200_events", |b| {
        b.iter(|| filter_by_time_of_day(black_box(events.clone()), TimeOfDay::Evening));
    });
}

criterion_group!(
    benches,
    bench_build_and_translate,
    bench_normalize,
    bench_time_of_day_filter
);

criterion_main!(benches);
