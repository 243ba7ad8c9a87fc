use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geotrack::{geohash, Location, LocationRegistry};

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode", |b| {
        b.iter(|| black_box(geohash::encode(black_box(40.5187), black_box(74.4121))));
    });
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode", |b| {
        b.iter(|| black_box(geohash::decode(black_box("txhyt21nx95k")).unwrap()));
    });
}

fn bench_encode_grid(c: &mut Criterion) {
    // 1° grid over the whole globe
    let coords: Vec<(f64, f64)> = (-90..=90)
        .flat_map(|lat| (-180..=180).map(move |lon| (lat as f64, lon as f64)))
        .collect();

    c.bench_function("encode_grid_65341", |b| {
        b.iter(|| {
            for &(lat, lon) in &coords {
                black_box(geohash::encode(lat, lon));
            }
        });
    });
}

fn bench_track_geohashes(c: &mut Criterion) {
    let mut registry = LocationRegistry::new();
    for i in 0..1000 {
        let t = i as f64 / 1000.0;
        registry.record(1, Location::new(40.0 + t, 74.0 + t));
    }

    c.bench_function("track_geohashes_1000", |b| {
        b.iter(|| {
            let track = registry.track(1).unwrap();
            let hashes: Vec<String> = track.all().iter().map(Location::geo_hash).collect();
            black_box(hashes);
        });
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_encode_grid,
    bench_track_geohashes
);
criterion_main!(benches);
