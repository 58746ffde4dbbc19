//! Benchmark for conversion and evaluation throughput
//!
//! Runs over a fixed, seeded corpus of generated expressions so results are
//! comparable between runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use notation_core::evaluator::evaluate;
use notation_core::notation::{convert, convert_to, identify, NotationKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Build a random infix expression with `depth` levels of nesting
fn generate_infix(rng: &mut StdRng, depth: u32) -> String {
    if depth == 0 || rng.gen_bool(0.2) {
        return rng.gen_range(1..1000).to_string();
    }

    let op = OPERATORS[rng.gen_range(0..OPERATORS.len())];
    let left = generate_infix(rng, depth - 1);
    let right = generate_infix(rng, depth - 1);
    if rng.gen_bool(0.5) {
        format!("({}{}{})", left, op, right)
    } else {
        format!("{} {} {}", left, op, right)
    }
}

/// Create a corpus of infix expressions plus their postfix forms
fn create_corpus(size: usize, depth: u32) -> (Vec<String>, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut infix = Vec::with_capacity(size);
    let mut postfix = Vec::with_capacity(size);

    while infix.len() < size {
        let expr = generate_infix(&mut rng, depth);
        if let Ok(converted) = convert_to(&expr, NotationKind::Infix, NotationKind::Postfix) {
            infix.push(expr);
            postfix.push(converted);
        }
    }

    (infix, postfix)
}

fn benchmark_identify(c: &mut Criterion) {
    let (infix, postfix) = create_corpus(256, 6);

    c.bench_function("identify_mixed", |b| {
        b.iter(|| {
            for expr in infix.iter().chain(postfix.iter()) {
                black_box(identify(black_box(expr)));
            }
        })
    });
}

fn benchmark_conversion(c: &mut Criterion) {
    let (infix, postfix) = create_corpus(256, 6);

    c.bench_function("convert_infix", |b| {
        b.iter(|| {
            for expr in &infix {
                let _ = black_box(convert(black_box(expr), NotationKind::Infix));
            }
        })
    });

    c.bench_function("convert_postfix", |b| {
        b.iter(|| {
            for expr in &postfix {
                let _ = black_box(convert(black_box(expr), NotationKind::Postfix));
            }
        })
    });
}

fn benchmark_evaluation(c: &mut Criterion) {
    let (infix, postfix) = create_corpus(256, 6);

    // Division by zero or overflow in the corpus is fine; errors are timed too
    c.bench_function("evaluate_infix", |b| {
        b.iter(|| {
            for expr in &infix {
                let _ = black_box(evaluate(black_box(expr)));
            }
        })
    });

    c.bench_function("evaluate_postfix", |b| {
        b.iter(|| {
            for expr in &postfix {
                let _ = black_box(evaluate(black_box(expr)));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_identify,
    benchmark_conversion,
    benchmark_evaluation
);
criterion_main!(benches);
