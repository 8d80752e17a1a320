pub mod debt_graph;
pub mod snapshot;
