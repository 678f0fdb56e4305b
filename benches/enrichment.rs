use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rayon::prelude::*;

use go_enrich::annotations::AssociationMap;
use go_enrich::enrichment::{analyze, EnrichmentConfig};
use go_enrich::Ontology;

const TREE_DEPTH: u32 = 10;

/// Complete binary tree: term `n` is a child of term `n / 2`
fn binary_tree_ontology() -> Ontology {
    let mut ontology = Ontology::default();
    let max = 2u32.pow(TREE_DEPTH + 1);
    for id in 1..max {
        ontology.insert_term(
            format!("term {id}"),
            String::from("biological_process"),
            id,
        );
    }
    for id in 2..max {
        ontology
            .add_parent(id / 2, id)
            .expect("both terms were just inserted");
    }
    ontology.create_cache();
    ontology
}

/// Annotates every member to one leaf, spread over all leaves
fn leaf_annotations(members: u32) -> AssociationMap {
    let first_leaf = 2u32.pow(TREE_DEPTH);
    let mut map = AssociationMap::new();
    for member in 0..members {
        let leaf = first_leaf + (member * 131 + 7) % first_leaf;
        map.add(&format!("B{member:05}"), leaf.into());
    }
    map
}

fn subset_of(background: &AssociationMap, step: usize) -> AssociationMap {
    let members: Vec<&str> = background
        .members()
        .map(String::as_str)
        .enumerate()
        .filter_map(|(idx, member)| (idx % step == 0).then_some(member))
        .collect();
    background.subset(members)
}

fn analyze_benchmark(c: &mut Criterion) {
    let ontology = binary_tree_ontology();
    let background = leaf_annotations(5000);
    let subset = subset_of(&background, 10);
    let config = EnrichmentConfig::default();

    c.bench_function("analyze 500 of 5000", |b| {
        b.iter(|| {
            analyze(black_box(&ontology), &background, &subset, &config)
                .expect("counts are consistent")
                .n_tested()
        })
    });
}

fn parallel_benchmark(c: &mut Criterion) {
    let ontology = binary_tree_ontology();
    let background = leaf_annotations(5000);
    let subsets: Vec<AssociationMap> = (2..12).map(|step| subset_of(&background, step)).collect();
    let config = EnrichmentConfig::default();

    c.bench_function("analyze 10 subsets in parallel", |b| {
        b.iter(|| -> usize {
            subsets
                .par_iter()
                .map(|subset| {
                    analyze(black_box(&ontology), &background, subset, &config)
                        .expect("counts are consistent")
                        .n_tested()
                })
                .sum()
        })
    });
}

criterion_group! {
    name = enrichment;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(10));
    targets = analyze_benchmark, parallel_benchmark
}
criterion_main!(enrichment);
