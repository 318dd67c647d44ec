// benches/decode_benchmark.rs
use byteorder::{ByteOrder, LittleEndian};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mpx_rs::*;

/// Build a capture with one continuous analog channel split across
/// `blocks` data blocks of `samples_per_block` samples each.
fn synthetic_capture(blocks: usize, samples_per_block: usize) -> Vec<u8> {
    let mut capture = Vec::new();

    let mut definition = vec![0u8; 45];
    LittleEndian::write_u16(&mut definition[0..2], 45);
    definition[2] = b'2';
    LittleEndian::write_i16(&mut definition[8..10], 1);
    LittleEndian::write_i16(&mut definition[10..12], 1);
    LittleEndian::write_i16(&mut definition[12..14], 1);
    LittleEndian::write_f32(&mut definition[24..28], 44.0);
    definition[38..44].copy_from_slice(b"RAW 01");
    capture.extend(&definition);

    let samples: Vec<i16> = (0..samples_per_block as i16).collect();
    for _ in 0..blocks {
        let length = 10 + samples.len() * 2;
        let mut block = vec![0u8; length];
        LittleEndian::write_u16(&mut block[0..2], length as u16);
        block[2] = b'5';
        LittleEndian::write_i16(&mut block[4..6], 1);
        LittleEndian::write_i16_into(&samples, &mut block[6..6 + samples.len() * 2]);
        capture.extend(block);
    }
    capture
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let registry = CommandParserRegistry::with_defaults();

    for blocks in [100, 1_000, 10_000].iter() {
        let capture = synthetic_capture(*blocks, 128);
        group.throughput(Throughput::Bytes(capture.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &capture, |b, capture| {
            b.iter(|| decode(capture, &registry).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_decode);
criterion_main!(benches);
