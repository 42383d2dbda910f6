use index_vec::IndexVec;

index_vec::define_index_type! {
    pub(super) struct NodeIndex = usize;
}

/// Node layout of the matching network: the source, `size[0] + 1` nodes for side A (the last one
/// being the gap node), `size[1] + 1` nodes for side B (likewise), and the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Node {
    Source,
    A(usize),
    B(usize),
    Sink,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct NodeLayout {
    size: [usize; 2],
}

impl NodeLayout {
    pub fn new(size: [usize; 2]) -> Self {
        NodeLayout { size }
    }

    pub fn node_count(&self) -> usize {
        self.size[0] + self.size[1] + 4
    }

    pub fn index(&self, node: Node) -> NodeIndex {
        NodeIndex::new(match node {
            Node::Source => 0,
            Node::A(a) => 1 + a,
            Node::B(b) => self.size[0] + 2 + b,
            Node::Sink => self.size[0] + self.size[1] + 3,
        })
    }

    pub fn node(&self, index: NodeIndex) -> Node {
        let raw = index.raw();
        if raw == 0 {
            Node::Source
        } else if raw <= self.size[0] + 1 {
            Node::A(raw - 1)
        } else if raw <= self.size[0] + self.size[1] + 2 {
            Node::B(raw - self.size[0] - 2)
        } else {
            Node::Sink
        }
    }

    pub fn filled<T: Clone>(&self, value: T) -> IndexVec<NodeIndex, T> {
        IndexVec::from_vec(vec![value; self.node_count()])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_every_node() {
        let layout = NodeLayout::new([3, 2]);
        assert_eq!(layout.node_count(), 9);
        let nodes = [
            Node::Source,
            Node::A(0),
            Node::A(1),
            Node::A(2),
            Node::A(3),
            Node::B(0),
            Node::B(1),
            Node::B(2),
            Node::Sink,
        ];
        for (raw, &node) in nodes.iter().enumerate() {
            assert_eq!(layout.index(node), NodeIndex::new(raw));
            assert_eq!(layout.node(NodeIndex::new(raw)), node);
        }
    }
}
