use cohort_core::{Grouping, RelationGraph};

/// Two teacher pairs: T1/T2 share two students, T3/T4 share one.
#[must_use]
pub fn two_pairs() -> RelationGraph {
    RelationGraph::build([
        ("T1", "S1"),
        ("T1", "S2"),
        ("T2", "S1"),
        ("T2", "S2"),
        ("T3", "S3"),
        ("T4", "S3"),
    ])
}

/// Each group flattened to sorted member names, groups sorted.
#[must_use]
pub fn normalised(grouping: &Grouping) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = grouping
        .groups()
        .iter()
        .map(|group| {
            let mut names: Vec<String> = group.members().map(|member| member.to_string()).collect();
            names.sort();
            names
        })
        .collect();
    groups.sort();
    groups
}
