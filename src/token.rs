use petgraph::graph::NodeIndex;

use crate::graph::MolGraph;

/// Renders a path as its structural token: each atom's element symbol
/// followed by the symbol of the bond to the next atom ("" single, "="
/// double, "#" triple), ending with the last atom's element symbol.
///
/// Tokens are structural, not identity-bound: two paths over different
/// atoms with the same element and bond sequence produce the same token.
pub fn path_token(graph: &MolGraph, path: &[NodeIndex]) -> String {
    let mut token = String::new();
    for pair in path.windows(2) {
        let order = graph
            .bond_order(pair[0], pair[1])
            .expect("consecutive path atoms must share a bond");
        token.push_str(graph.atom(pair[0]).element.symbol());
        token.push_str(order.symbol());
    }
    if let Some(&last) = path.last() {
        token.push_str(graph.atom(last).element.symbol());
    }
    token
}
