//! Criterion benchmarks for u-assign generation.
//!
//! Uses synthetic rosters of increasing size against a full midweek
//! program to measure classification and selection overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_assign::engine::{AssignmentGenerator, GeneratorConfig, RunContext, StrategyKind};
use u_assign::model::{Participant, Privilege, Program, ProgramPart, Sex};
use u_assign::roster::classify;
use u_assign::rules::RuleCatalog;

// ===========================================================================
// Fixtures
// ===========================================================================

fn synthetic_roster(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| {
            let sex = if i % 2 == 0 { Sex::Male } else { Sex::Female };
            let p = Participant::new(format!("p{i}"), format!("P{i}"), sex);
            match (sex, i % 10) {
                (Sex::Male, 0) => p.with_privilege(Privilege::Elder),
                (Sex::Male, 4) => p.with_privilege(Privilege::MinisterialServant),
                _ => p,
            }
        })
        .collect()
}

fn midweek_program() -> Program {
    let types = [
        "treasures_talk",
        "spiritual_gems",
        "bible_reading",
        "starting",
        "following_up",
        "making_disciples",
        "explaining_beliefs",
        "living_part",
        "local_needs",
        "congregation_bible_study",
    ];
    Program::new(
        types
            .iter()
            .enumerate()
            .map(|(i, t)| ProgramPart::new(i as u32 + 1, *t, *t))
            .collect(),
    )
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for n in [50, 200, 1000] {
        let roster = synthetic_roster(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &roster, |b, roster| {
            b.iter(|| classify(black_box(roster)))
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let program = midweek_program();
    let ctx = RunContext::now();
    let mut group = c.benchmark_group("generate");

    for (label, config) in [
        ("first_fit", GeneratorConfig::default()),
        (
            "seeded_shuffle",
            GeneratorConfig::default()
                .with_strategy(StrategyKind::SeededShuffle)
                .with_seed(42),
        ),
    ] {
        let generator = match AssignmentGenerator::new(RuleCatalog::standard(), config) {
            Ok(g) => g,
            Err(e) => panic!("bench config: {e}"),
        };
        for n in [50, 200, 1000] {
            let roster = synthetic_roster(n);
            group.bench_with_input(BenchmarkId::new(label, n), &roster, |b, roster| {
                b.iter(|| generator.generate(black_box(&program), black_box(roster), &ctx))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_generate);
criterion_main!(benches);
