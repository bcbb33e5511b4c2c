//! 错误类型
//!
//! 拓扑生成过程中所有可失败操作共用的错误枚举。

use crate::tdl::{ComponentId, PortId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopoError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("integer overflow while computing {what}")]
    Overflow { what: String },

    #[error("containment of {child} in {parent:?} has zero multiplicity")]
    ZeroMultiplicity { parent: ComponentId, child: String },

    #[error("component {child:?} is already contained by {parent:?}")]
    AlreadyContained {
        child: ComponentId,
        parent: ComponentId,
    },

    #[error("containing {child:?} in {parent:?} would create a cycle")]
    ContainmentCycle {
        parent: ComponentId,
        child: ComponentId,
    },

    #[error("port {port:?} is already owned by {owner:?}")]
    PortAlreadyOwned { port: PortId, owner: ComponentId },

    #[error("connector component {component:?} is not a direct child of scope {scope:?}")]
    ConnectorOutOfScope {
        scope: ComponentId,
        component: ComponentId,
    },

    #[error("port {port:?} is not reachable from component {component:?}")]
    PortNotReachable {
        component: ComponentId,
        port: PortId,
    },

    #[error("bipartite constraint needs two distinct components, got {0:?} on both sides")]
    DegenerateBipartite(ComponentId),

    #[error("pairwise constraint requires at least one connection")]
    ZeroConnections,
}
