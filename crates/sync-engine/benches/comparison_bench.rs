use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use groupsync_core::{Policy, LISTS_KEY};
use serde_json::json;
use std::hint::black_box;
use sync_engine::{compare_policies, group_policies};

/// A listing with `roles` children per group, each group missing a third
fn listing(roles: u64) -> Vec<Policy> {
    let groups = [(1u64, "dev-WinSvr"), (2, "prd-WinSvr"), (3, "qas-WinSvr")];
    let mut policies: Vec<Policy> = groups
        .iter()
        .map(|(id, name)| Policy::new(*id, *name))
        .collect();

    let mut next_id = 10;
    for (offset, (group_id, group_name)) in groups.iter().enumerate() {
        for role in 0..roles {
            if (role + offset as u64) % 3 == 0 {
                continue;
            }
            let mut child =
                Policy::new(next_id, format!("{group_name}-Role{role}")).with_parent(*group_id);
            child
                .extra
                .insert(LISTS_KEY.to_string(), json!({"fileListIDs": [1, 2, 3]}));
            policies.push(child);
            next_id += 1;
        }
    }
    policies
}

fn benchmark_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_grouping");

    for roles in [10u64, 100, 1000] {
        let policies = listing(roles);
        group.throughput(Throughput::Elements(policies.len() as u64));
        group.bench_with_input(BenchmarkId::new("group", roles), &policies, |b, policies| {
            b.iter(|| group_policies(black_box(policies)))
        });
        group.bench_with_input(
            BenchmarkId::new("group_and_compare", roles),
            &policies,
            |b, policies| b.iter(|| compare_policies(black_box(policies))),
        );
    }

    group.finish();
}

fn benchmark_strip_lists(c: &mut Criterion) {
    let policies = listing(100);
    c.bench_function("strip_lists", |b| {
        b.iter(|| {
            for policy in &policies {
                let mut copy = policy.clone();
                copy.strip_key(black_box(LISTS_KEY));
                black_box(copy);
            }
        })
    });
}

criterion_group!(benches, benchmark_grouping, benchmark_strip_lists);
criterion_main!(benches);
