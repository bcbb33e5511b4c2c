//! 连接器
//!
//! 把两组组件、两组端口和一组约束绑定在一起，交给外部求解器分配链路。

use super::constraint::PairwiseConstraint;
use crate::tdl::{ComponentId, PortId};
use serde::Serialize;

/// One (component, component, port, port) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentPair {
    pub a: ComponentId,
    pub b: ComponentId,
    pub port_a: PortId,
    pub port_b: PortId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Connector {
    pairs: Vec<ComponentPair>,
    constraints: Vec<PairwiseConstraint>,
}

impl Connector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_component_pair_to_connect(
        &mut self,
        a: ComponentId,
        b: ComponentId,
        port_a: PortId,
        port_b: PortId,
    ) {
        self.pairs.push(ComponentPair {
            a,
            b,
            port_a,
            port_b,
        });
    }

    pub fn add_constraints(&mut self, constraints: impl IntoIterator<Item = PairwiseConstraint>) {
        self.constraints.extend(constraints);
    }

    pub fn pairs(&self) -> &[ComponentPair] {
        &self.pairs
    }

    pub fn constraints(&self) -> &[PairwiseConstraint] {
        &self.constraints
    }
}
