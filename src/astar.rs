//! A best-first search in the style of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! with a floating point heuristic on top of an integer path cost and a fixed tie-breaking
//! order so that repeated searches over the same input expand nodes identically.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::{ToPrimitive, Zero};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Counters describing a finished search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken from the open set and closed.
    pub expanded: usize,
    /// Distinct nodes ever discovered.
    pub discovered: usize,
}

/// A heap entry. Entries are never updated in place: a cheaper route to a node pushes a new
/// entry and the outdated one is skipped when popped.
struct SmallestCostHolder<K> {
    estimated_cost: f64,
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K> Eq for SmallestCostHolder<K> {}

impl<K> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest estimate wins, then the earliest push
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Per-node search record. `parent` indexes into the same map, `usize::MAX` marks the root.
struct NodeRecord<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `success` accepts an expanded node.
///
/// `successors` yields neighbouring nodes with the (non-negative) cost of stepping onto them
/// and `heuristic` estimates the remaining cost. With an admissible, consistent heuristic the
/// returned path is a cheapest one. Returns the path including both endpoints and its cost,
/// or [None] once every reachable node has been expanded.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    successors: FN,
    heuristic: FH,
    success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy + ToPrimitive,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> f64,
    FS: FnMut(&N) -> bool,
{
    astar_with_stats(start, successors, heuristic, success).0
}

/// [astar] that also reports how much work the search did.
pub fn astar_with_stats<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> (Option<(Vec<N>, C)>, SearchStats)
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy + ToPrimitive,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> f64,
    FS: FnMut(&N) -> bool,
{
    let mut stats = SearchStats::default();
    let mut sequence = 0;
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: C::zero(),
        sequence,
        index: 0,
    });
    let mut parents: FxIndexMap<N, NodeRecord<C>> = FxIndexMap::default();
    parents.insert(
        start.clone(),
        NodeRecord {
            parent: usize::MAX,
            cost: C::zero(),
            closed: false,
        },
    );
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let node = {
            let (node, record) = parents
                .get_index_mut(index)
                .expect("heap entries always index into the node map");
            // A node may have been pushed several times if a cheaper route was found later;
            // only the entry carrying the recorded cost is current.
            if record.closed || cost > record.cost {
                continue;
            }
            record.closed = true;
            stats.expanded += 1;
            if success(node) {
                stats.discovered = parents.len();
                let path = reverse_path(&parents, |r| r.parent, index);
                return (Some((path, cost)), stats);
            }
            node.clone()
        };
        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeRecord {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    if e.get().closed || e.get().cost <= new_cost {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    let record = e.get_mut();
                    record.cost = new_cost;
                    record.parent = index;
                }
            }
            sequence += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost.to_f64().unwrap_or(f64::INFINITY) + h,
                cost: new_cost,
                sequence,
                index: n,
            });
        }
    }
    stats.discovered = parents.len();
    (None, stats)
}
