//! Benchmarks for pinwire frame encoding and decoding

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pinwire::protocol::{Body, Command, Message};

fn hardware_frame() -> Message {
    let mut msg = Message::default();
    msg.build(Command::Hardware)
        .push_str("vw")
        .push_int(5)
        .push_float(21.75)
        .push_str("celsius");
    msg
}

fn codec_benchmarks(c: &mut Criterion) {
    c.bench_function("message_encode", |b| {
        let mut msg = hardware_frame();
        b.iter(|| black_box(msg.encode().unwrap()))
    });

    let bytes = hardware_frame().encode().unwrap();
    c.bench_function("message_decode", |b| {
        b.iter(|| black_box(Message::decode(black_box(&bytes)).unwrap()))
    });

    let payload: Vec<u8> = (0..64).flat_map(|i| [b'x', b'0' + (i % 10) as u8, 0]).collect();
    c.bench_function("body_decode_64_fields", |b| {
        b.iter(|| black_box(Body::decode(black_box(&payload))))
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
