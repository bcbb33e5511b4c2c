//! 拓扑生成器
//!
//! BCube、DCell 与 FatTree 三种数据中心拓扑的结构描述。每个生成器都是
//! 独立的纯函数：输入整数参数，返回完整的组件树与连接器。

pub mod bcube;
pub mod dcell;
pub mod fat_tree;
pub mod spec;

pub use spec::{AnyTopology, TopologySpec};

use crate::connect::{
    Connector, exactly_x_connections, self_pair_exactly_x_connections,
};
use crate::error::TopoError;
use crate::tdl::{ComponentGraph, ComponentId, PortId};

/// Every rule in these topologies asks for exactly one link per pair.
pub(crate) const CONNECTIONS_PER_PAIR: u64 = 1;

/// One `lvl{i}-port` per level `0..=top_level`.
pub(crate) fn add_level_ports(graph: &mut ComponentGraph, top_level: u32) -> Vec<PortId> {
    (0..=top_level)
        .map(|i| graph.add_port(format!("lvl{}-port", i), None))
        .collect()
}

/// Deepest recursion level the recursive generators accept.
pub const MAX_LEVEL: u32 = 32;

pub(crate) fn require_level(k: u32) -> Result<(), TopoError> {
    if k > MAX_LEVEL {
        return Err(TopoError::InvalidParameter {
            name: "k",
            reason: format!("level {} exceeds the maximum of {}", k, MAX_LEVEL),
        });
    }
    Ok(())
}

pub(crate) fn require_positive(name: &'static str, value: u64) -> Result<(), TopoError> {
    if value == 0 {
        return Err(TopoError::InvalidParameter {
            name,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Attaches a connector requiring every (a, b) instance pair inside `scope`
/// to be linked once.
pub(crate) fn connect_every_pair(
    graph: &mut ComponentGraph,
    scope: ComponentId,
    (a, port_a): (ComponentId, PortId),
    (b, port_b): (ComponentId, PortId),
) -> Result<(), TopoError> {
    let mut constraints = Vec::new();
    exactly_x_connections(&mut constraints, a, b, CONNECTIONS_PER_PAIR)?;

    let mut connector = Connector::new();
    connector.add_component_pair_to_connect(a, b, port_a, port_b);
    connector.add_constraints(constraints);
    graph.add_connector(scope, connector)
}

/// Attaches a connector requiring every distinct pair of `group` instances
/// inside `scope` to be linked once, through `port` on both ends.
pub(crate) fn connect_siblings(
    graph: &mut ComponentGraph,
    scope: ComponentId,
    group: ComponentId,
    port: PortId,
) -> Result<(), TopoError> {
    let mut constraints = Vec::new();
    self_pair_exactly_x_connections(&mut constraints, group, CONNECTIONS_PER_PAIR)?;

    let mut connector = Connector::new();
    connector.add_component_pair_to_connect(group, group, port, port);
    connector.add_constraints(constraints);
    graph.add_connector(scope, connector)
}
