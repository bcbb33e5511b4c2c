//! 组件图
//!
//! 存放一次生成调用产生的全部组件、端口与连接器。

use super::component::{Child, Component, ComponentKind, Containment};
use super::id::{ComponentId, PortId};
use super::port::{Port, PortSpeed};
use crate::connect::Connector;
use crate::error::TopoError;
use serde::Serialize;
use tracing::trace;

/// Arena of component and port templates.
///
/// A template stands for every instance of itself: containing a component
/// with `count = 4` means the parent holds four copies of the whole subtree.
/// Containment forms a tree, so every component has at most one parent and
/// every port at most one owner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentGraph {
    components: Vec<Component>,
    ports: Vec<Port>,
    #[serde(skip)]
    parents: Vec<Option<ComponentId>>,
    #[serde(skip)]
    port_owners: Vec<Option<ComponentId>>,
}

/// 拓扑统计（按实例展开后的数量）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologySummary {
    pub name: String,
    pub templates: usize,
    pub ports: usize,
    pub switches: u64,
    pub hosts: u64,
    pub connectors: usize,
    pub links: u64,
}

impl ComponentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加普通容器组件
    pub fn add_component(&mut self, name: impl Into<String>) -> ComponentId {
        self.push_component(name.into(), ComponentKind::Container)
    }

    /// 添加交换机组件
    pub fn add_switch(&mut self, name: impl Into<String>) -> ComponentId {
        self.push_component(name.into(), ComponentKind::Switch)
    }

    /// 添加终端主机组件
    pub fn add_end_host(&mut self, name: impl Into<String>) -> ComponentId {
        self.push_component(name.into(), ComponentKind::EndHost)
    }

    /// Adds a container tagged with the recursion level it was built for.
    pub fn add_level_component(&mut self, name: impl Into<String>, level: u32) -> ComponentId {
        let id = self.push_component(name.into(), ComponentKind::Container);
        self.components[id.0].level = Some(level);
        id
    }

    pub fn add_port(&mut self, name: impl Into<String>, speed: Option<PortSpeed>) -> PortId {
        let id = PortId(self.ports.len());
        self.ports.push(Port {
            id,
            name: name.into(),
            speed,
        });
        self.port_owners.push(None);
        id
    }

    fn push_component(&mut self, name: String, kind: ComponentKind) -> ComponentId {
        let id = ComponentId(self.components.len());
        trace!(?id, %name, ?kind, "new component");
        self.components.push(Component::new(id, name, kind));
        self.parents.push(None);
        id
    }

    /// Records that `parent` holds `count` instances of `child`.
    pub fn contains(
        &mut self,
        parent: ComponentId,
        child: impl Into<Child>,
        count: u64,
    ) -> Result<(), TopoError> {
        let child = child.into();
        if count == 0 {
            return Err(TopoError::ZeroMultiplicity {
                parent,
                child: self.child_name(child).to_string(),
            });
        }

        match child {
            Child::Component(id) => {
                if let Some(owner) = self.parents[id.0] {
                    return Err(TopoError::AlreadyContained { child: id, parent: owner });
                }
                if id == parent || self.is_ancestor(id, parent) {
                    return Err(TopoError::ContainmentCycle { parent, child: id });
                }
                self.parents[id.0] = Some(parent);
            }
            Child::Port(id) => {
                if let Some(owner) = self.port_owners[id.0] {
                    return Err(TopoError::PortAlreadyOwned { port: id, owner });
                }
                self.port_owners[id.0] = Some(parent);
            }
        }

        self.components[parent.0]
            .children
            .push(Containment { child, count });
        Ok(())
    }

    /// Attaches `connector` to `scope`, the component owning the connectivity rule.
    ///
    /// Every component named by the connector must be a direct child of
    /// `scope`, and every port must live somewhere inside the component it
    /// is paired with.
    pub fn add_connector(
        &mut self,
        scope: ComponentId,
        connector: Connector,
    ) -> Result<(), TopoError> {
        for pair in connector.pairs() {
            self.check_in_scope(scope, pair.a)?;
            self.check_in_scope(scope, pair.b)?;
            self.check_port_reachable(pair.a, pair.port_a)?;
            self.check_port_reachable(pair.b, pair.port_b)?;
        }
        for constraint in connector.constraints() {
            let (a, b) = constraint.participants();
            self.check_in_scope(scope, a)?;
            self.check_in_scope(scope, b)?;
        }
        self.components[scope.0].connectors.push(connector);
        Ok(())
    }

    fn check_in_scope(&self, scope: ComponentId, component: ComponentId) -> Result<(), TopoError> {
        if self.parents[component.0] == Some(scope) {
            Ok(())
        } else {
            Err(TopoError::ConnectorOutOfScope { scope, component })
        }
    }

    fn check_port_reachable(&self, component: ComponentId, port: PortId) -> Result<(), TopoError> {
        match self.port_owners[port.0] {
            Some(owner) if owner == component || self.is_ancestor(component, owner) => Ok(()),
            _ => Err(TopoError::PortNotReachable { component, port }),
        }
    }

    /// `true` if `ancestor` sits strictly above `id` in the containment tree.
    fn is_ancestor(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        let mut cur = self.parents[id.0];
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parents[p.0];
        }
        false
    }

    fn child_name(&self, child: Child) -> &str {
        match child {
            Child::Component(id) => &self.components[id.0].name,
            Child::Port(id) => &self.ports[id.0].name,
        }
    }

    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    pub fn port(&self, id: PortId) -> &Port {
        &self.ports[id.0]
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.parents[id.0]
    }

    pub fn port_owner(&self, id: PortId) -> Option<ComponentId> {
        self.port_owners[id.0]
    }

    pub fn children(&self, id: ComponentId) -> &[Containment] {
        &self.components[id.0].children
    }

    pub fn connectors(&self, id: ComponentId) -> &[Connector] {
        &self.components[id.0].connectors
    }

    /// Direct multiplicity of `child` inside `parent` (0 when absent).
    pub fn child_count(&self, parent: ComponentId, child: impl Into<Child>) -> u64 {
        let child = child.into();
        self.children(parent)
            .iter()
            .filter(|c| c.child == child)
            .map(|c| c.count)
            .sum()
    }

    /// Number of instances of `target` inside a single instance of `root`,
    /// multiplying multiplicities along every containment path.
    pub fn instance_count(&self, root: ComponentId, target: impl Into<Child>) -> u64 {
        self.instance_count_of(root, target.into())
    }

    fn instance_count_of(&self, root: ComponentId, target: Child) -> u64 {
        if target == Child::Component(root) {
            return 1;
        }
        self.children(root)
            .iter()
            .map(|c| match c.child {
                Child::Component(id) => c.count.saturating_mul(self.instance_count_of(id, target)),
                Child::Port(_) if c.child == target => c.count,
                Child::Port(_) => 0,
            })
            .fold(0, u64::saturating_add)
    }

    /// Total instances of every component of `kind` under `root`.
    pub fn kind_instance_count(&self, root: ComponentId, kind: ComponentKind) -> u64 {
        self.components
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| self.instance_count(root, c.id))
            .fold(0, u64::saturating_add)
    }

    /// Physical links a solver has to allocate to satisfy every constraint
    /// reachable from `root`.
    pub fn required_links(&self, root: ComponentId) -> u64 {
        self.components
            .iter()
            .filter(|c| !c.connectors.is_empty())
            .map(|scope| {
                let scope_instances = self.instance_count(root, scope.id);
                let per_scope = scope
                    .connectors
                    .iter()
                    .flat_map(|conn| conn.constraints())
                    .map(|cstr| {
                        let (a, b) = cstr.participants();
                        let pairs =
                            cstr.pair_count(self.child_count(scope.id, a), self.child_count(scope.id, b));
                        pairs.saturating_mul(cstr.connections())
                    })
                    .fold(0, u64::saturating_add);
                scope_instances.saturating_mul(per_scope)
            })
            .fold(0, u64::saturating_add)
    }

    pub fn summarize(&self, root: ComponentId) -> TopologySummary {
        TopologySummary {
            name: self.component(root).name.clone(),
            templates: self.components.len(),
            ports: self.ports.len(),
            switches: self.kind_instance_count(root, ComponentKind::Switch),
            hosts: self.kind_instance_count(root, ComponentKind::EndHost),
            connectors: self.components.iter().map(|c| c.connectors.len()).sum(),
            links: self.required_links(root),
        }
    }
}
