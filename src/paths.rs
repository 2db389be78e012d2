use petgraph::graph::NodeIndex;

use crate::graph::MolGraph;

/// All simple paths (no repeated atom) from `start` to `end` with at most
/// `max_edges` bonds, in depth-first discovery order.
///
/// `start == end` yields exactly the trivial single-atom path.
pub fn simple_paths(
    graph: &MolGraph,
    start: NodeIndex,
    end: NodeIndex,
    max_edges: usize,
) -> Vec<Vec<NodeIndex>> {
    PathSearch::new(graph, start, Some(end), max_edges).run()
}

/// All simple paths starting at `start` with at most `max_edges` bonds,
/// regardless of endpoint.
///
/// Every prefix of the depth-first search is itself a simple path, so one
/// traversal covers every (start, end) pair for this `start`. The result
/// always begins with the trivial `[start]` path.
pub fn simple_paths_from(
    graph: &MolGraph,
    start: NodeIndex,
    max_edges: usize,
) -> Vec<Vec<NodeIndex>> {
    PathSearch::new(graph, start, None, max_edges).run()
}

struct PathSearch<'a> {
    graph: &'a MolGraph,
    target: Option<NodeIndex>,
    max_edges: usize,
    path: Vec<NodeIndex>,
    on_path: Vec<bool>,
    found: Vec<Vec<NodeIndex>>,
}

impl<'a> PathSearch<'a> {
    fn new(
        graph: &'a MolGraph,
        start: NodeIndex,
        target: Option<NodeIndex>,
        max_edges: usize,
    ) -> Self {
        let mut on_path = vec![false; graph.atom_count()];
        on_path[start.index()] = true;
        Self {
            graph,
            target,
            max_edges,
            path: vec![start],
            on_path,
            found: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Vec<NodeIndex>> {
        self.recurse();
        self.found
    }

    fn recurse(&mut self) {
        let cur = *self.path.last().expect("search path is never empty");
        match self.target {
            Some(end) if cur == end => {
                self.found.push(self.path.clone());
                // a simple path cannot leave the target and come back
                return;
            }
            Some(_) => {}
            None => self.found.push(self.path.clone()),
        }
        // path of n atoms has n - 1 edges; extending adds one more
        if self.path.len() > self.max_edges {
            return;
        }
        let neighbors: Vec<NodeIndex> = self.graph.neighbors(cur).collect();
        for next in neighbors {
            if self.on_path[next.index()] {
                continue;
            }
            self.path.push(next);
            self.on_path[next.index()] = true;
            self.recurse();
            self.path.pop();
            self.on_path[next.index()] = false;
        }
    }
}
