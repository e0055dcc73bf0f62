//! Dependency ordering of workspace packages.
//!
//! The sort is deliberately tolerant: dependency names that are not part of
//! the input are ignored, and cycles do not cause an error. Each package of a
//! cycle is still emitted exactly once, but the order inside the cycle cannot
//! honour every edge. Use [`find_cycle`] to detect that situation.

use std::collections::HashMap;

use super::PackageInfo;

fn index_by_name(packages: &[PackageInfo]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(packages.len());
    for (position, package) in packages.iter().enumerate() {
        // the first package with a given name wins
        index.entry(package.name()).or_insert(position);
    }
    index
}

/// Order packages so that every package follows the packages it depends on.
///
/// Depth-first post-order over the input order. A package is marked visited
/// on entry, before its dependencies, which is what keeps cycles finite.
/// Packages whose name was already emitted are dropped.
pub fn topological_sort(packages: Vec<PackageInfo>) -> Vec<PackageInfo> {
    let order = {
        let index = index_by_name(&packages);
        let mut visited = vec![false; packages.len()];
        let mut order = Vec::with_capacity(packages.len());
        for position in 0..packages.len() {
            let canonical = index[packages[position].name()];
            visit(canonical, &packages, &index, &mut visited, &mut order);
        }
        order
    };

    let mut slots: Vec<Option<PackageInfo>> = packages.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect()
}

fn visit(
    position: usize,
    packages: &[PackageInfo],
    index: &HashMap<&str, usize>,
    visited: &mut [bool],
    order: &mut Vec<usize>,
) {
    if visited[position] {
        return;
    }
    visited[position] = true;

    for dependency in packages[position].dependencies() {
        if let Some(&dependency_position) = index.get(dependency.as_str()) {
            visit(dependency_position, packages, index, visited, order);
        }
    }

    order.push(position);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Find a dependency cycle among `packages`.
///
/// The cycle is returned as package names with the first name repeated at
/// the end, e.g. `["a", "b", "a"]`.
pub fn find_cycle(packages: &[PackageInfo]) -> Option<Vec<String>> {
    let index = index_by_name(packages);
    let mut marks = vec![Mark::Unvisited; packages.len()];
    let mut stack = Vec::new();

    for position in 0..packages.len() {
        if marks[position] == Mark::Unvisited {
            if let Some(cycle) = search_cycle(position, packages, &index, &mut marks, &mut stack) {
                return Some(cycle);
            }
        }
    }
    None
}

fn search_cycle(
    position: usize,
    packages: &[PackageInfo],
    index: &HashMap<&str, usize>,
    marks: &mut [Mark],
    stack: &mut Vec<usize>,
) -> Option<Vec<String>> {
    marks[position] = Mark::InProgress;
    stack.push(position);

    for dependency in packages[position].dependencies() {
        let Some(&dependency_position) = index.get(dependency.as_str()) else {
            continue;
        };
        match marks[dependency_position] {
            Mark::InProgress => {
                let start = stack.iter().rposition(|&p| p == dependency_position)?;
                let mut cycle: Vec<String> = stack[start..]
                    .iter()
                    .map(|&p| packages[p].name().to_owned())
                    .collect();
                cycle.push(packages[dependency_position].name().to_owned());
                return Some(cycle);
            }
            Mark::Unvisited => {
                if let Some(cycle) = search_cycle(dependency_position, packages, index, marks, stack) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    stack.pop();
    marks[position] = Mark::Done;
    None
}

/// Group a topologically sorted slice into build waves.
///
/// Returns one wave number per package. A package's wave is one past the
/// highest wave of any dependency that appears earlier in the slice, so
/// packages in the same wave never depend on each other and every wave only
/// depends on earlier ones. Dependencies appearing later (only possible
/// across a cycle) are ignored.
pub fn build_waves(sorted: &[PackageInfo]) -> Vec<usize> {
    let mut wave_by_name: HashMap<&str, usize> = HashMap::with_capacity(sorted.len());
    sorted
        .iter()
        .map(|package| {
            let wave = package
                .dependencies()
                .iter()
                .filter_map(|dependency| wave_by_name.get(dependency.as_str()))
                .map(|wave| wave + 1)
                .max()
                .unwrap_or(0);
            wave_by_name.entry(package.name()).or_insert(wave);
            wave
        })
        .collect()
}
