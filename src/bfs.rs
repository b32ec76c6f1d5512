//! This module implements a breadth-first variant of
//! [pathfinding's bfs function](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html)
//! in which the parent map doubles as the visited set, so that every node is enqueued at most once.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;
use log::debug;
use std::collections::VecDeque;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Follows parent indices from `start` back to the root and returns the nodes root-first.
fn reverse_path<N>(parents: &FxIndexMap<N, usize>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents
            .get_index(i)
            .map(|(_, &parent)| parent)
            .filter(|&parent| parent != usize::MAX)
    })
    .filter_map(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Runs a breadth-first search from `start`, returning the nodes from `start` to the first
/// node satisfying `success`, both inclusive. The goal test is applied when a node is dequeued,
/// which is when its distance is final. Returns [None] once every reachable node has been
/// dequeued without success.
pub fn bfs<N, FN, IN, FS>(start: &N, mut successors: FN, mut success: FS) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut to_see: VecDeque<usize> = VecDeque::new();
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), usize::MAX);
    to_see.push_back(0);
    while let Some(index) = to_see.pop_front() {
        let successors = {
            let (node, _) = parents.get_index(index)?;
            if success(node) {
                return Some(reverse_path(&parents, index));
            }
            successors(node)
        };
        for successor in successors {
            if let Vacant(e) = parents.entry(successor) {
                to_see.push_back(e.index());
                e.insert(index);
            }
        }
    }
    debug!("Search exhausted after visiting {} nodes", parents.len());
    None
}
