use crate::graph::{amplify::Amplify, gate::Gate, node::GraphNode};

pub trait NodeExt: GraphNode + Sized {
    fn amplify<M>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    /// Only let the node sound between two absolute frames.
    fn gate(self, start_frame: u64, stop_frame: u64) -> Gate<Self> {
        Gate::new(self, start_frame, stop_frame)
    }
}

impl<T: GraphNode> NodeExt for T {}
