use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mudp::{MidiMessage, decode, encode};

fn batch(len: usize) -> Vec<MidiMessage> {
    (0..len)
        .map(|i| match i % 3 {
            0 => MidiMessage::note_on(0, (i % 128) as u8, 100),
            1 => MidiMessage::program_change(1, (i % 128) as u8),
            _ => MidiMessage::pitch_bend(2, (i * 37 % 0x4000) as u16),
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    // Single note
    let single = batch(1);
    group.throughput(Throughput::Elements(1));
    group.bench_function("encode_1msg", |b| {
        b.iter(|| {
            black_box(encode(&single).unwrap());
        });
    });

    // Full packet
    let full = batch(255);
    group.throughput(Throughput::Elements(255));
    group.bench_function("encode_255msg", |b| {
        b.iter(|| {
            black_box(encode(&full).unwrap());
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let single = encode(&batch(1)).unwrap();
    group.throughput(Throughput::Bytes(single.len() as u64));
    group.bench_function("decode_1msg", |b| {
        b.iter(|| {
            black_box(decode(&single).unwrap());
        });
    });

    let full = encode(&batch(255)).unwrap();
    group.throughput(Throughput::Bytes(full.len() as u64));
    group.bench_function("decode_255msg", |b| {
        b.iter(|| {
            black_box(decode(&full).unwrap());
        });
    });

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let msgs = batch(64);
    group.throughput(Throughput::Elements(64));
    group.bench_function("roundtrip_64msg", |b| {
        b.iter(|| {
            let encoded = encode(&msgs).unwrap();
            black_box(decode(&encoded).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_roundtrip);
criterion_main!(benches);
