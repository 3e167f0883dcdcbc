//! Microbenchmarks for the lazy UTF-8 decoding view.
//!
//! Run with `cargo bench --bench decode`.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use collatekit::decode::Utf8View;

fn ascii_buffer(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

fn accented_buffer(chars: usize) -> Vec<u8> {
    "\u{e9}".repeat(chars).into_bytes()
}

fn bench_latin_fast_path(c: &mut Criterion) {
    let bytes = ascii_buffer(4096);
    c.bench_function("char_at/latin_4096", |b| {
        b.iter(|| {
            let mut view = Utf8View::new(&bytes);
            let mut acc = 0u32;
            for i in 0..view.len() {
                acc = acc.wrapping_add(u32::from(view.char_at(i).unwrap()));
            }
            black_box(acc)
        })
    });
}

fn bench_sequential_decode(c: &mut Criterion) {
    let bytes = accented_buffer(2048);
    c.bench_function("char_at/two_byte_2048", |b| {
        b.iter(|| {
            let mut view = Utf8View::new(&bytes);
            let mut acc = 0u32;
            for i in 0..view.len() {
                acc = acc.wrapping_add(u32::from(view.char_at(i).unwrap()));
            }
            black_box(acc)
        })
    });
}

fn bench_cached_reread(c: &mut Criterion) {
    let bytes = accented_buffer(2048);
    c.bench_function("char_at/cached_reread_2048", |b| {
        let mut view = Utf8View::new(&bytes);
        let last = view.len() - 1;
        view.char_at(last).unwrap();
        b.iter(|| {
            let mut acc = 0u32;
            for i in 0..=last {
                acc = acc.wrapping_add(u32::from(view.char_at(i).unwrap()));
            }
            black_box(acc)
        })
    });
}

criterion_group!(
    benches,
    bench_latin_fast_path,
    bench_sequential_decode,
    bench_cached_reread
);
criterion_main!(benches);
