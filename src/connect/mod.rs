//! 连接描述
//!
//! 连接器与成对约束只是规格说明，不做实例展开，也不求解。

mod connector;
mod constraint;

pub use connector::{ComponentPair, Connector};
pub use constraint::{PairwiseConstraint, exactly_x_connections, self_pair_exactly_x_connections};
