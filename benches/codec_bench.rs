use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffpack::{compress, decompress, FrequencyTable, HuffmanTree};

fn sample_text(len: usize) -> Vec<u8> {
    b"It was the best of times, it was the worst of times, it was the age of wisdom, \
      it was the age of foolishness, it was the epoch of belief. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for len in [1_000usize, 64_000] {
        let input = sample_text(len);
        let packed = compress(&input).unwrap();
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("compress", len), &input, |b, input| {
            b.iter(|| compress(input).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("decompress", len), &packed, |b, packed| {
            b.iter(|| decompress(packed).unwrap())
        });
    }
    group.finish();
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    // Every byte value, with skewed counts.
    let table: FrequencyTable = (0..=255u8).map(|s| (s, 1 + (s as u32 * 37) % 1000)).collect();

    group.bench_function("build_256", |b| {
        b.iter(|| HuffmanTree::build(&table).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_codec, bench_tree);
criterion_main!(benches);
