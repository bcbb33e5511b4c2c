//! 成对连接约束

use crate::error::TopoError;
use crate::tdl::ComponentId;
use serde::Serialize;

/// Required connection multiplicity between component groups.
///
/// `Bipartite` pairs every instance of `a` with every instance of `b`.
/// `SelfPair` pairs every distinct pair of instances drawn from `group`;
/// it is how sibling sub-topologies interconnect without a distinguished
/// parent switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairwiseConstraint {
    Bipartite {
        a: ComponentId,
        b: ComponentId,
        connections: u64,
    },
    SelfPair {
        group: ComponentId,
        connections: u64,
    },
}

impl PairwiseConstraint {
    pub fn connections(&self) -> u64 {
        match *self {
            PairwiseConstraint::Bipartite { connections, .. } => connections,
            PairwiseConstraint::SelfPair { connections, .. } => connections,
        }
    }

    pub fn is_self_pair(&self) -> bool {
        matches!(self, PairwiseConstraint::SelfPair { .. })
    }

    /// Both sides of the rule; a self-pair names its group twice.
    pub fn participants(&self) -> (ComponentId, ComponentId) {
        match *self {
            PairwiseConstraint::Bipartite { a, b, .. } => (a, b),
            PairwiseConstraint::SelfPair { group, .. } => (group, group),
        }
    }

    /// Number of instance pairs the rule applies to, given how many
    /// instances of each side exist in one scope.
    pub fn pair_count(&self, count_a: u64, count_b: u64) -> u64 {
        match self {
            PairwiseConstraint::Bipartite { .. } => count_a.saturating_mul(count_b),
            PairwiseConstraint::SelfPair { .. } => {
                count_a.saturating_mul(count_a.saturating_sub(1)) / 2
            }
        }
    }
}

/// 追加一条二分约束：每个 (a, b) 实例对恰好 `connections` 条连接
pub fn exactly_x_connections(
    constraints: &mut Vec<PairwiseConstraint>,
    a: ComponentId,
    b: ComponentId,
    connections: u64,
) -> Result<(), TopoError> {
    if a == b {
        return Err(TopoError::DegenerateBipartite(a));
    }
    if connections == 0 {
        return Err(TopoError::ZeroConnections);
    }
    constraints.push(PairwiseConstraint::Bipartite { a, b, connections });
    Ok(())
}

/// 追加一条自配对约束：`group` 中每对不同实例恰好 `connections` 条连接
pub fn self_pair_exactly_x_connections(
    constraints: &mut Vec<PairwiseConstraint>,
    group: ComponentId,
    connections: u64,
) -> Result<(), TopoError> {
    if connections == 0 {
        return Err(TopoError::ZeroConnections);
    }
    constraints.push(PairwiseConstraint::SelfPair { group, connections });
    Ok(())
}
