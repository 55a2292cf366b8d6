use criterion::{criterion_group, criterion_main, Criterion};
use detect_gps::classify::is_gps;
use std::hint::black_box;
use std::time::Duration;

pub fn bench_classification(c: &mut Criterion) {
    let mut noise = vec![0x55u8; 256];
    noise[200] = b'$';
    let mut nmea = vec![b'.'; 200];
    nmea.extend_from_slice(b"\r\n$GPGGA,123519,4807.038,N,01131.000,E,1,08\r\n");
    nmea.truncate(256);

    c.bench_function("classify_noise_256", |b| {
        b.iter(|| black_box(is_gps(black_box(&noise), b"\n$GP")))
    });
    c.bench_function("classify_nmea_256", |b| {
        b.iter(|| black_box(is_gps(black_box(&nmea), b"\n$GP")))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(2));
    targets = bench_classification
}
criterion_main!(benches);
