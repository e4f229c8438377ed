// Criterion benchmarks for Donor Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use donor_match::core::{distance::{calculate_bounding_box, haversine_distance}, DonorMatcher};
use donor_match::models::{Coordinate, DonorCandidate, MatchMode, MatchRequest};

const BLOOD_TYPES: [&str; 8] = ["O-", "O+", "A-", "A+", "B-", "B+", "AB-", "AB+"];

fn create_donor(id: usize, lat: f64, lon: f64) -> DonorCandidate {
    DonorCandidate {
        id: id.to_string(),
        blood_type: BLOOD_TYPES[id % BLOOD_TYPES.len()].to_string(),
        // Every fifth donor has not shared a location
        location: (id % 5 != 0).then_some(Coordinate { latitude: lat, longitude: lon }),
        name: Some(format!("Donor {}", id)),
        phone: None,
    }
}

fn create_request(mode: MatchMode) -> MatchRequest {
    MatchRequest {
        blood_type: "AB+".to_string(),
        location: Some(Coordinate { latitude: 40.7128, longitude: -74.0060 }),
        max_radius_km: Some(25.0),
        mode,
    }
}

fn create_donors(count: usize) -> Vec<DonorCandidate> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.001) % 0.5;
            create_donor(i, 40.7128 + lat_offset, -74.0060 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| {
            calculate_bounding_box(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(50.0),
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = DonorMatcher::default();
    let request = create_request(MatchMode::Compatible);

    let mut group = c.benchmark_group("matching");

    for donor_count in [10, 50, 100, 500, 1000, 10000].iter() {
        let donors = create_donors(*donor_count);

        group.bench_with_input(
            BenchmarkId::new("find_matches", donor_count),
            donor_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&request), black_box(&donors)));
            },
        );
    }

    group.finish();
}

fn bench_all_types_broadcast(c: &mut Criterion) {
    let matcher = DonorMatcher::default();
    let request = create_request(MatchMode::AllTypes);
    let donors = create_donors(1000);

    c.bench_function("all_types_1000_donors", |b| {
        b.iter(|| matcher.find_matches(black_box(&request), black_box(&donors)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_matching,
    bench_all_types_broadcast
);

criterion_main!(benches);
