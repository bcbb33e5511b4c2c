//! BCube 拓扑构建
//!
//! BCube_0 是一台 n 口交换机连接 n 台服务器；BCube_k 由 n 个 BCube_{k-1}
//! 和 n^k 台 n 口交换机组成，每台交换机与每个子 BCube 各连一条链路。
//! 服务器在每一层都有独立的端口 `lvl{i}-port`。

use super::{add_level_ports, connect_every_pair, require_level, require_positive};
use crate::error::TopoError;
use crate::tdl::{ComponentGraph, ComponentId, PortId};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BCubeOpts {
    /// Top recursion level.
    pub k: u32,
    /// Switch port count, also the number of sub-cubes per level.
    pub n: u64,
}

impl Default for BCubeOpts {
    fn default() -> Self {
        Self { k: 1, n: 4 }
    }
}

#[derive(Debug, Clone)]
pub struct BCubeTopology {
    pub k: u32,
    pub n: u64,
    pub graph: ComponentGraph,
    pub container: ComponentId,
    /// `levels[i]` is the BCube_i template.
    pub levels: Vec<ComponentId>,
    /// `switches[i]` is the switch template used at level i.
    pub switches: Vec<ComponentId>,
    pub switch_ports: Vec<PortId>,
    /// `level_ports[i]` is the server port reserved for level i.
    pub level_ports: Vec<PortId>,
    pub server: ComponentId,
}

impl BCubeTopology {
    pub fn top_level(&self) -> ComponentId {
        self.levels[self.k as usize]
    }

    pub fn level(&self, level: u32) -> ComponentId {
        self.levels[level as usize]
    }

    pub fn switch(&self, level: u32) -> ComponentId {
        self.switches[level as usize]
    }

    pub fn level_port(&self, level: u32) -> PortId {
        self.level_ports[level as usize]
    }
}

/// 一次构建调用的上下文，在递归中向下传递
struct BCubeBuilder {
    graph: ComponentGraph,
    n: u64,
    level_ports: Vec<PortId>,
    server: ComponentId,
    levels: Vec<ComponentId>,
    switches: Vec<ComponentId>,
    switch_ports: Vec<PortId>,
}

impl BCubeBuilder {
    fn add_switch(&mut self) -> Result<(ComponentId, PortId), TopoError> {
        let sw = self.graph.add_switch("switch");
        let port = self.graph.add_port("port", None);
        self.graph.contains(sw, port, self.n)?;
        Ok((sw, port))
    }

    fn build_level(&mut self, level: u32) -> Result<ComponentId, TopoError> {
        let bcube = self
            .graph
            .add_level_component(format!("bcube_lvl{}_", level), level);

        let num_switches = self.n.checked_pow(level).ok_or_else(|| TopoError::Overflow {
            what: format!("BCube level {} switch count", level),
        })?;
        let (sw, sw_port) = self.add_switch()?;
        self.graph.contains(bcube, sw, num_switches)?;

        if level == 0 {
            self.graph.contains(bcube, self.server, self.n)?;
            connect_every_pair(
                &mut self.graph,
                bcube,
                (sw, sw_port),
                (self.server, self.level_ports[0]),
            )?;
        } else {
            let sub = self.build_level(level - 1)?;
            self.graph.contains(bcube, sub, self.n)?;
            connect_every_pair(
                &mut self.graph,
                bcube,
                (sw, sw_port),
                (sub, self.level_ports[level as usize]),
            )?;
        }
        debug!(level, num_switches, "BCube level built");

        // Children finish first, so levels land in ascending order.
        self.levels.push(bcube);
        self.switches.push(sw);
        self.switch_ports.push(sw_port);
        Ok(bcube)
    }
}

#[tracing::instrument(skip(opts), fields(k = opts.k, n = opts.n))]
pub fn build_bcube(opts: &BCubeOpts) -> Result<BCubeTopology, TopoError> {
    let BCubeOpts { k, n } = *opts;
    require_level(k)?;
    require_positive("n", n)?;
    let num_servers = k
        .checked_add(1)
        .and_then(|e| n.checked_pow(e))
        .ok_or_else(|| TopoError::Overflow {
            what: "BCube server count".to_string(),
        })?;

    let mut graph = ComponentGraph::new();
    let container = graph.add_component("bcube");

    let level_ports = add_level_ports(&mut graph, k);
    let server = graph.add_end_host("server");
    for port in &level_ports {
        graph.contains(server, *port, 1)?;
    }

    let mut builder = BCubeBuilder {
        graph,
        n,
        level_ports,
        server,
        levels: Vec::with_capacity(k as usize + 1),
        switches: Vec::with_capacity(k as usize + 1),
        switch_ports: Vec::with_capacity(k as usize + 1),
    };
    let top = builder.build_level(k)?;
    builder.graph.contains(container, top, 1)?;

    info!(num_servers, "BCube built");
    Ok(BCubeTopology {
        k,
        n,
        graph: builder.graph,
        container,
        levels: builder.levels,
        switches: builder.switches,
        switch_ports: builder.switch_ports,
        level_ports: builder.level_ports,
        server,
    })
}
