use nalgebra::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
}

/// A proximity edge between `nodes[a]` and `nodes[b]`, valid for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

/// Every unordered pair closer than `threshold`. Each pair appears once with
/// `a < b`.
pub fn edges(nodes: &[Node], threshold: f64) -> impl Iterator<Item = Edge> + '_ {
    nodes.iter().enumerate().flat_map(move |(a, node_a)| {
        nodes[a + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, node_b)| {
                let distance = (node_a.position - node_b.position).norm();
                if distance < threshold {
                    Some(Edge {
                        a,
                        b: a + 1 + offset,
                        distance,
                    })
                } else {
                    None
                }
            })
    })
}
