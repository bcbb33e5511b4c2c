//! 组件类型
//!
//! 拓扑中的节点：普通容器、交换机或终端主机。

use super::id::{ComponentId, PortId};
use crate::connect::Connector;
use serde::Serialize;

/// 组件类别（只影响身份标记，不影响结构）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Container,
    Switch,
    EndHost,
}

/// Something a component can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Child {
    Component(ComponentId),
    Port(PortId),
}

impl From<ComponentId> for Child {
    fn from(id: ComponentId) -> Self {
        Child::Component(id)
    }
}

impl From<PortId> for Child {
    fn from(id: PortId) -> Self {
        Child::Port(id)
    }
}

/// 一条包含边：`count` 个 `child` 实例
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Containment {
    pub child: Child,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub kind: ComponentKind,
    /// Recursion level for components produced by a recursive generator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Containment edges in insertion order.
    pub children: Vec<Containment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<Connector>,
}

impl Component {
    pub(crate) fn new(id: ComponentId, name: String, kind: ComponentKind) -> Self {
        Self {
            id,
            name,
            kind,
            level: None,
            children: Vec::new(),
            connectors: Vec::new(),
        }
    }

    pub fn is_switch(&self) -> bool {
        self.kind == ComponentKind::Switch
    }

    pub fn is_end_host(&self) -> bool {
        self.kind == ComponentKind::EndHost
    }

    /// Iterates over directly contained components with their multiplicity.
    pub fn child_components(&self) -> impl Iterator<Item = (ComponentId, u64)> + '_ {
        self.children.iter().filter_map(|c| match c.child {
            Child::Component(id) => Some((id, c.count)),
            Child::Port(_) => None,
        })
    }

    /// Iterates over directly contained ports with their multiplicity.
    pub fn child_ports(&self) -> impl Iterator<Item = (PortId, u64)> + '_ {
        self.children.iter().filter_map(|c| match c.child {
            Child::Port(id) => Some((id, c.count)),
            Child::Component(_) => None,
        })
    }
}
