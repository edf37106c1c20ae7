//! Benchmarks for gpx_wire performance.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gpx_wire::{Gpx, Length, Track, TrackSegment, WayPoint};

// A short city walk: a handful of named waypoints
fn waypoint_document() -> Gpx {
    let mut gpx = Gpx::new("gpx-wire-bench");
    for i in 0..10 {
        let mut wpt = WayPoint::of(48.20 + i as f64 * 0.001, 16.37 + i as f64 * 0.001).unwrap();
        wpt.elevation = Some(Length::from_meters(160.0 + i as f64).unwrap());
        wpt.name = Some(format!("Point {}", i));
        gpx.waypoints.push(wpt);
    }
    gpx
}

// A recorded ride: one track with timestamped, elevation-tagged points
fn track_document(points: usize) -> Gpx {
    let start = Utc.with_ymd_and_hms(2016, 8, 21, 12, 24, 27).unwrap();
    let mut segment = TrackSegment::default();
    for i in 0..points {
        let mut wpt = WayPoint::of(
            48.20 + (i % 500) as f64 * 0.0001,
            16.37 + (i % 500) as f64 * 0.0001,
        )
        .unwrap();
        wpt.elevation = Some(Length::from_meters(160.0 + (i % 40) as f64 * 0.5).unwrap());
        wpt.time = Some(start + chrono::Duration::seconds(i as i64));
        segment.points.push(wpt);
    }
    let mut gpx = Gpx::new("gpx-wire-bench");
    gpx.tracks.push(Track {
        name: Some("Morning ride".to_string()),
        segments: vec![segment],
        ..Track::default()
    });
    gpx
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("Write");

    let waypoints = waypoint_document();
    let track = track_document(1000);

    group.bench_function("waypoints", |b| {
        b.iter(|| black_box(&waypoints).to_xml().unwrap())
    });

    group.bench_function("track_1000", |b| {
        b.iter(|| black_box(&track).to_xml().unwrap())
    });

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("Read");

    let waypoint_xml = waypoint_document().to_xml().unwrap();
    let track_xml = track_document(1000).to_xml().unwrap();

    group.throughput(Throughput::Bytes(waypoint_xml.len() as u64));
    group.bench_function("waypoints", |b| {
        b.iter(|| Gpx::from_xml(black_box(&waypoint_xml)).unwrap())
    });

    group.throughput(Throughput::Bytes(track_xml.len() as u64));
    group.bench_function("track_1000", |b| {
        b.iter(|| Gpx::from_xml(black_box(&track_xml)).unwrap())
    });

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("Roundtrip");

    let track = track_document(100);

    group.bench_function("track_100", |b| {
        b.iter(|| {
            let xml = black_box(&track).to_xml().unwrap();
            Gpx::from_xml(black_box(&xml)).unwrap()
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");

    for size in [10, 100, 1000, 10000].iter() {
        let gpx = track_document(*size);
        let xml = gpx.to_xml().unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("write", size), &gpx, |b, gpx| {
            b.iter(|| gpx.to_xml().unwrap())
        });

        group.bench_with_input(BenchmarkId::new("read", size), &xml, |b, xml| {
            b.iter(|| Gpx::from_xml(black_box(xml)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_write, bench_read, bench_roundtrip, bench_scaling);

criterion_main!(benches);
