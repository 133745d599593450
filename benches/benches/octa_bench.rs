//! # Octa Benchmarks
//!
//! Measures both front ends and the executor on the reference hello-world program.
//!
//! Run: `cargo bench --bench octa_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use octa_core::{Program, Vm, VmConfig, assemble, compile_tape};

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

const COUNTDOWN_ASM: &str = "
    add 7
loop:
    biz loop
    sub 1
    adp 1
    add 3
    sdp 1
    bnz loop
    adp 1
    out
    hlt
";

/// Benchmark compilation of both languages
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    group.bench_function("tape_hello_world", |b| {
        b.iter(|| black_box(compile_tape(black_box(HELLO_WORLD)).unwrap()))
    });

    let repeated = HELLO_WORLD.repeat(32);
    group.bench_function("tape_hello_world_x32", |b| {
        b.iter(|| black_box(compile_tape(black_box(&repeated)).unwrap()))
    });

    group.bench_function("asm_countdown", |b| {
        b.iter(|| black_box(assemble(black_box(COUNTDOWN_ASM)).unwrap()))
    });

    group.finish();
}

/// Benchmark execution
fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    let hello = compile_tape(HELLO_WORLD).unwrap();
    group.bench_function("hello_world", |b| {
        b.iter(|| {
            let mut vm = Vm::new(hello.clone(), VmConfig::default()).unwrap();
            black_box(vm.run().unwrap())
        })
    });

    let countdown = assemble(COUNTDOWN_ASM).unwrap();
    group.bench_function("asm_countdown", |b| {
        b.iter(|| {
            let mut vm = Vm::new(countdown.clone(), VmConfig::default()).unwrap();
            black_box(vm.run().unwrap())
        })
    });

    // Nested countdown loops: 255 * 255 inner iterations
    let busy = compile_tape("-[>-[-]<-]").unwrap();
    group.bench_function("nested_loops", |b| {
        b.iter(|| {
            let mut vm = Vm::new(busy.clone(), VmConfig::default()).unwrap();
            black_box(vm.run().unwrap())
        })
    });

    group.finish();
}

/// Benchmark the lazy input fill across buffer sizes
fn bench_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_fill");
    let cat: Program = compile_tape(",[.,]").unwrap();

    for size in [256usize, 4096, 65536] {
        let bytes: Vec<u8> = (0..size).map(|i| (i % 255) as u8 + 1).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| {
                // one spare zero cell ends the loop
                let config = VmConfig::default()
                    .with_buffer_size(size + 1)
                    .with_tape_size(4);
                let mut vm = Vm::new(cat.clone(), config)
                    .unwrap()
                    .with_input_bytes(bytes.clone());
                black_box(vm.run().unwrap())
            })
        });
    }

    group.finish();
}

/// Program construction overhead
fn bench_vm_creation(c: &mut Criterion) {
    let program = compile_tape(HELLO_WORLD).unwrap();
    c.bench_function("vm_new_default", |b| {
        b.iter(|| black_box(Vm::new(program.clone(), VmConfig::default()).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_execute,
    bench_input,
    bench_vm_creation
);
criterion_main!(benches);
