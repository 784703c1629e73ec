use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gp_compactor::{HybridPreprocessor, PromptPipeline};
use gp_core::MemorySink;
use rand::seq::SliceRandom;
use rand::Rng;

const PHRASES: &[&str] = &[
    "could you please",
    "write a function",
    "that leads to",
    "the database",
    "and therefore",
    "is not equal to",
    "the user request",
    "because the deadline",
    "thanks",
    "never skip validation",
    "approximately",
    "in the web development team",
];

fn generate_prompt(size_kb: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(PHRASES.choose(&mut rng).copied().unwrap_or("data"));
        text.push_str(if rng.gen_bool(0.15) { ". " } else { " " });
    }
    text
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = PromptPipeline::builtin().unwrap();
    let prompt_1k = generate_prompt(1);
    let prompt_10k = generate_prompt(10);

    for ratio in [0.3, 0.5, 0.8] {
        c.bench_function(&format!("pipeline_1kb_r{ratio}"), |b| {
            b.iter(|| black_box(pipeline.compress(black_box(&prompt_1k), ratio)))
        });
    }
    c.bench_function("pipeline_10kb_r0.5", |b| b.iter(|| black_box(pipeline.compress(black_box(&prompt_10k), 0.5))));
}

fn bench_preprocess(c: &mut Criterion) {
    let pre = HybridPreprocessor::default();
    let prompt = generate_prompt(10);
    c.bench_function("normalize_10kb", |b| b.iter(|| black_box(pre.normalize(black_box(&prompt)))));
}

fn bench_with_sink(c: &mut Criterion) {
    let pipeline = PromptPipeline::builtin().unwrap();
    let prompt = generate_prompt(1);
    let sink = MemorySink::new();
    c.bench_function("pipeline_1kb_with_sink", |b| {
        b.iter(|| black_box(pipeline.compress_with_sink(black_box(&prompt), 0.5, &sink)))
    });
}

criterion_group!(benches, bench_pipeline, bench_preprocess, bench_with_sink);
criterion_main!(benches);
