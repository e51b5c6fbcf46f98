// Criterion benchmarks for Lume Compat

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use lume_compat::core::Scorer;
use lume_compat::models::{LifestyleFrequency, PersonalityTrait, ProfileSnapshot};

fn create_profile(id: usize, interest_count: usize) -> ProfileSnapshot {
    let traits = PersonalityTrait::ALL;

    ProfileSnapshot {
        user_id: id.to_string(),
        interests: Some((0..interest_count).map(|i| format!("interest_{}", (i + id) % 200)).collect()),
        personality_traits: Some((0..4).map(|i| traits[(i * 3 + id) % traits.len()]).collect()),
        relationship_goal: Some(if id % 2 == 0 { "serious" } else { "casual" }.to_string()),
        wants_children: Some(id % 3 == 0),
        smoking: Some(LifestyleFrequency::Never),
        drinking: Some(if id % 2 == 0 { LifestyleFrequency::Sometimes } else { LifestyleFrequency::Regularly }),
        education: Some("bachelor".to_string()),
        languages: Some(["en", "de"].iter().map(|s| s.to_string()).collect()),
    }
}

fn bench_score_pair(c: &mut Criterion) {
    let scorer = Scorer::default();
    let a = create_profile(1, 10);
    let b = create_profile(2, 10);

    c.bench_function("score_pair", |bench| {
        bench.iter(|| scorer.score(black_box(&a), black_box(&b)));
    });
}

fn bench_interest_sizes(c: &mut Criterion) {
    let scorer = Scorer::default();

    let mut group = c.benchmark_group("score_by_interest_count");

    for interest_count in [5, 20, 100, 200].iter() {
        let a = create_profile(1, *interest_count);
        let b = create_profile(7, *interest_count);

        group.bench_with_input(
            BenchmarkId::new("score", interest_count),
            interest_count,
            |bench, _| {
                bench.iter(|| scorer.score(black_box(&a), black_box(&b)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score_pair, bench_interest_sizes);

criterion_main!(benches);
