use divan::{Bencher, black_box};
use stmt_stream::parse_chunked;

use divan::AllocProfiler;

#[allow(unused)]
#[cfg_attr(feature = "alloc", global_allocator)]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

const SAMPLE_STATEMENTS: &[&str] = &[
    "print \"hello\";",
    "let counter = 1024;",
    "let name = other_name;",
    "print \"\"\"a longer\nmulti-line\nstring value\"\"\";",
];

/// Generate a program with `count` statements.
fn generate_program(count: usize) -> String {
    let mut result = String::with_capacity(count * 32);
    for i in 0..count {
        result.push_str(SAMPLE_STATEMENTS[i % SAMPLE_STATEMENTS.len()]);
        result.push('\n');
    }
    result
}

#[divan::bench(
    name = "single_chunk",
    args = [100, 1000, 10_000, 100_000],
)]
fn bench_single_chunk(bencher: Bencher, n: usize) {
    let input = generate_program(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| black_box(parse_chunked(input.as_bytes(), input.len()).unwrap()));
}

#[divan::bench(
    name = "network_chunks",
    args = [16, 256, 4096],
)]
fn bench_chunk_sizes(bencher: Bencher, chunk_size: usize) {
    let input = generate_program(10_000);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| black_box(parse_chunked(input.as_bytes(), chunk_size).unwrap()));
}

#[divan::bench(
    name = "byte_at_a_time",
    args = [100, 1000],
)]
fn bench_byte_at_a_time(bencher: Bencher, n: usize) {
    let input = generate_program(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| black_box(parse_chunked(input.as_bytes(), 1).unwrap()));
}
