use criterion::{black_box, criterion_group, criterion_main, Criterion};
use downlink_strip::{encode_packet, validate_packet};

fn bench_validate(c: &mut Criterion) {
    let small = encode_packet(&[7u8; 192]).unwrap();
    let max = encode_packet(&vec![42u8; u16::MAX as usize]).unwrap();

    c.bench_function("validate_192b", |b| b.iter(|| validate_packet(black_box(&small)).unwrap().len()));
    c.bench_function("validate_64k", |b| b.iter(|| validate_packet(black_box(&max)).unwrap().len()));
}

fn bench_encode(c: &mut Criterion) {
    let data = vec![42u8; u16::MAX as usize];
    c.bench_function("encode_64k", |b| b.iter(|| encode_packet(black_box(&data)).unwrap()));
}

criterion_group!(benches, bench_validate, bench_encode);
criterion_main!(benches);
