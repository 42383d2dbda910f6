use index_vec::IndexVec;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::{
    cost::{CostModel, TCost},
    error::MatchError,
    indices::{Node, NodeIndex, NodeLayout},
    pairing::Pairing,
    Matcher, MIN_PARALLEL_CHUNK,
};

/// Finds the pairing of minimum total cost, regardless of element order.
///
/// The two lists become a flow network: source → A nodes → B nodes → sink, where each side has an
/// extra gap node standing for "unmatched". Routing every element (`|A| + |B|` units of flow) at
/// minimum cost is the same as choosing the cheapest set of pairs and gaps. The flow is found by
/// successive shortest augmenting paths, computed with Dijkstra over reduced costs.
pub struct MinCostFlowMatcher<C> {
    costs: C,
}

impl<C> MinCostFlowMatcher<C> {
    pub fn new(costs: C) -> Self {
        MinCostFlowMatcher { costs }
    }
}

/// Residual state of the network. Edges between A and B nodes are dense and kept in
/// `(size[0] + 1) × (size[1] + 1)` row-major arrays; row `size[0]` and column `size[1]` belong
/// to the gap nodes.
struct Network {
    size: [usize; 2],
    layout: NodeLayout,
    cost: Vec<TCost>,
    capacity: Vec<usize>,
    flow: Vec<usize>,
    source_capacity: Vec<usize>,
    source_flow: Vec<usize>,
    sink_capacity: Vec<usize>,
    sink_flow: Vec<usize>,
}

impl Network {
    fn new<T: Sync, C: CostModel<T>>(costs: &C, list_a: &[T], list_b: &[T]) -> Result<Network, MatchError> {
        let size = [list_a.len(), list_b.len()];
        let columns = size[1] + 1;
        let cost = (0..(size[0] + 1) * columns)
            .into_par_iter()
            .with_min_len(MIN_PARALLEL_CHUNK)
            .map(|index| {
                let (a, b) = (index / columns, index % columns);
                match (a < size[0], b < size[1]) {
                    (true, true) => costs.checked_diff_cost(&list_a[a], &list_b[b]),
                    (true, false) => costs.checked_gap_cost_a(&list_a[a]),
                    (false, true) => costs.checked_gap_cost_b(&list_b[b]),
                    (false, false) => Ok(0.0),
                }
            })
            .collect::<Result<Vec<TCost>, MatchError>>()?;

        let mut capacity = vec![1; cost.len()];
        capacity[size[0] * columns + size[1]] = usize::min(size[0], size[1]);

        let side_capacity = |side: usize| {
            let mut result = vec![1; size[side] + 1];
            result[size[side]] = size[1 - side];
            result
        };

        Ok(Network {
            size,
            layout: NodeLayout::new(size),
            flow: vec![0; cost.len()],
            cost,
            capacity,
            source_capacity: side_capacity(0),
            source_flow: vec![0; size[0] + 1],
            sink_capacity: side_capacity(1),
            sink_flow: vec![0; size[1] + 1],
        })
    }

    fn edge(&self, a: usize, b: usize) -> usize {
        a * (self.size[1] + 1) + b
    }

    /// Calls `visit(target, cost)` for every edge leaving `node` that has residual capacity.
    /// Edges back into the source and out of the sink never lie on a shortest path and are skipped.
    fn for_each_residual_edge(&self, node: NodeIndex, mut visit: impl FnMut(NodeIndex, TCost)) {
        match self.layout.node(node) {
            Node::Source => {
                for a in 0..=self.size[0] {
                    if self.source_flow[a] < self.source_capacity[a] {
                        visit(self.layout.index(Node::A(a)), 0.0);
                    }
                }
            }
            Node::A(a) => {
                for b in 0..=self.size[1] {
                    let edge = self.edge(a, b);
                    if self.flow[edge] < self.capacity[edge] {
                        visit(self.layout.index(Node::B(b)), self.cost[edge]);
                    }
                }
            }
            Node::B(b) => {
                for a in 0..=self.size[0] {
                    let edge = self.edge(a, b);
                    if self.flow[edge] > 0 {
                        visit(self.layout.index(Node::A(a)), -self.cost[edge]);
                    }
                }
                if self.sink_flow[b] < self.sink_capacity[b] {
                    visit(self.layout.index(Node::Sink), 0.0);
                }
            }
            Node::Sink => {}
        }
    }

    fn residual(&self, from: NodeIndex, to: NodeIndex) -> usize {
        match (self.layout.node(from), self.layout.node(to)) {
            (Node::Source, Node::A(a)) => self.source_capacity[a] - self.source_flow[a],
            (Node::A(a), Node::B(b)) => self.capacity[self.edge(a, b)] - self.flow[self.edge(a, b)],
            (Node::B(b), Node::A(a)) => self.flow[self.edge(a, b)],
            (Node::B(b), Node::Sink) => self.sink_capacity[b] - self.sink_flow[b],
            edge => unreachable!("{edge:?} is not an edge of the network"),
        }
    }

    fn push(&mut self, from: NodeIndex, to: NodeIndex, amount: usize) {
        match (self.layout.node(from), self.layout.node(to)) {
            (Node::Source, Node::A(a)) => self.source_flow[a] += amount,
            (Node::A(a), Node::B(b)) => {
                let edge = self.edge(a, b);
                self.flow[edge] += amount;
            }
            (Node::B(b), Node::A(a)) => {
                let edge = self.edge(a, b);
                self.flow[edge] -= amount;
            }
            (Node::B(b), Node::Sink) => self.sink_flow[b] += amount,
            edge => unreachable!("{edge:?} is not an edge of the network"),
        }
    }

    /// Dijkstra from the source over reduced costs `cost + potential[from] - potential[to]`, which
    /// are non-negative up to rounding. Settles nodes in order of distance, lowest index first on
    /// ties, and stops once the sink is settled.
    fn shortest_paths(
        &self,
        potential: &IndexVec<NodeIndex, TCost>,
    ) -> (IndexVec<NodeIndex, TCost>, IndexVec<NodeIndex, Option<NodeIndex>>) {
        let source = self.layout.index(Node::Source);
        let sink = self.layout.index(Node::Sink);
        let mut distance = self.layout.filled(TCost::INFINITY);
        let mut previous = self.layout.filled(None);
        let mut settled = self.layout.filled(false);
        distance[source] = 0.0;

        loop {
            let mut current: Option<NodeIndex> = None;
            for (node, &node_distance) in distance.iter_enumerated() {
                if settled[node] || node_distance == TCost::INFINITY {
                    continue;
                }
                if current.map_or(true, |best| node_distance < distance[best]) {
                    current = Some(node);
                }
            }
            let Some(current) = current else {
                break;
            };
            settled[current] = true;
            if current == sink {
                break;
            }

            self.for_each_residual_edge(current, |next, cost| {
                let reduced = (cost + potential[current] - potential[next]).max(0.0);
                let candidate = distance[current] + reduced;
                if candidate < distance[next] {
                    distance[next] = candidate;
                    previous[next] = Some(current);
                }
            });
        }

        (distance, previous)
    }

    fn path_to_sink(&self, previous: &IndexVec<NodeIndex, Option<NodeIndex>>) -> Vec<(NodeIndex, NodeIndex)> {
        let mut result = vec![];
        let mut node = self.layout.index(Node::Sink);
        while let Some(before) = previous[node] {
            result.push((before, node));
            node = before;
        }
        result.reverse();
        result
    }

    fn saturate(&mut self) {
        let required = self.size[0] + self.size[1];
        let sink = self.layout.index(Node::Sink);
        let mut potential = self.layout.filled(0.0);
        let mut routed = 0;
        let mut augmentations = 0;

        while routed < required {
            let (distance, previous) = self.shortest_paths(&potential);
            assert!(
                distance[sink].is_finite(),
                "matching network saturated after {routed} of {required} units"
            );
            for (node, node_potential) in potential.iter_mut_enumerated() {
                *node_potential += TCost::min(distance[node], distance[sink]);
            }

            let path = self.path_to_sink(&previous);
            let amount = path
                .iter()
                .map(|&(from, to)| self.residual(from, to))
                .min()
                .unwrap_or(0);
            for &(from, to) in &path {
                self.push(from, to, amount);
            }
            routed += amount;
            augmentations += 1;
            trace!(augmentations, amount, routed, "augmented");
        }
        debug!(augmentations, "network saturated");
    }

    fn pairings(&self) -> Vec<Pairing> {
        let mut result = vec![];
        for a in 0..=self.size[0] {
            for b in 0..=self.size[1] {
                if self.flow[self.edge(a, b)] == 0 {
                    continue;
                }
                let pairing =
                    Pairing::from_options(Some(a).filter(|&a| a < self.size[0]), Some(b).filter(|&b| b < self.size[1]));
                if !pairing.is_empty() {
                    result.push(pairing);
                }
            }
        }
        result.sort_unstable();
        result
    }
}

impl<T: Sync, C: CostModel<T>> Matcher<T> for MinCostFlowMatcher<C> {
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        debug!(size_a = list_a.len(), size_b = list_b.len(), "min-cost-flow matching");
        let mut network = Network::new(&self.costs, list_a, list_b)?;
        network.saturate();
        Ok(network.pairings())
    }
}
