//! DCell 拓扑构建
//!
//! DCell_0 是 n 台服务器连到一台交换机；DCell_k 由 g_k 个 DCell_{k-1}
//! 组成，任意两个子 DCell 之间恰好一条链路，经由各自服务器的
//! `lvl{k}-port` 相连。
//!
//! 规模由两条互递归公式决定：
//!
//! ```text
//! t_0 = n          t_k = g_k * t_{k-1}
//! g_0 = 1          g_k = t_{k-1} + 1
//! ```

use super::{add_level_ports, connect_every_pair, connect_siblings, require_level, require_positive};
use crate::error::TopoError;
use crate::tdl::{ComponentGraph, ComponentId, PortId};
use tracing::{debug, info};

/// Servers in a level-`k` DCell (`t_k`).
pub fn dcell_t(k: u32, n: u64) -> Result<u64, TopoError> {
    if k == 0 {
        return Ok(n);
    }
    dcell_g(k, n)?
        .checked_mul(dcell_t(k - 1, n)?)
        .ok_or_else(|| overflow("t", k))
}

/// Level-`(k-1)` sub-DCells in a level-`k` DCell (`g_k`).
pub fn dcell_g(k: u32, n: u64) -> Result<u64, TopoError> {
    if k == 0 {
        return Ok(1);
    }
    dcell_t(k - 1, n)?
        .checked_add(1)
        .ok_or_else(|| overflow("g", k))
}

fn overflow(which: &str, k: u32) -> TopoError {
    TopoError::Overflow {
        what: format!("DCell {}_{}", which, k),
    }
}

#[derive(Debug, Clone)]
pub struct DCellOpts {
    /// Top recursion level.
    pub k: u32,
    /// Servers per DCell_0, also the port count of the DCell_0 switch.
    pub n: u64,
}

impl Default for DCellOpts {
    fn default() -> Self {
        Self { k: 1, n: 4 }
    }
}

#[derive(Debug, Clone)]
pub struct DCellTopology {
    pub k: u32,
    pub n: u64,
    pub graph: ComponentGraph,
    pub container: ComponentId,
    /// `levels[i]` is the DCell_i template.
    pub levels: Vec<ComponentId>,
    pub level_ports: Vec<PortId>,
    pub switch: ComponentId,
    pub switch_port: PortId,
    pub server: ComponentId,
}

impl DCellTopology {
    pub fn top_level(&self) -> ComponentId {
        self.levels[self.k as usize]
    }

    pub fn level(&self, level: u32) -> ComponentId {
        self.levels[level as usize]
    }

    pub fn level_port(&self, level: u32) -> PortId {
        self.level_ports[level as usize]
    }
}

struct DCellBuilder {
    graph: ComponentGraph,
    n: u64,
    level_ports: Vec<PortId>,
    switch: ComponentId,
    switch_port: PortId,
    server: ComponentId,
    levels: Vec<ComponentId>,
}

impl DCellBuilder {
    fn build_level(&mut self, level: u32) -> Result<ComponentId, TopoError> {
        let dcell = self
            .graph
            .add_level_component(format!("dcell_lvl{}_", level), level);

        if level == 0 {
            self.graph.contains(dcell, self.server, self.n)?;
            self.graph.contains(dcell, self.switch, 1)?;
            connect_every_pair(
                &mut self.graph,
                dcell,
                (self.server, self.level_ports[0]),
                (self.switch, self.switch_port),
            )?;
        } else {
            let sub = self.build_level(level - 1)?;
            let num_sub = dcell_g(level, self.n)?;
            self.graph.contains(dcell, sub, num_sub)?;
            connect_siblings(&mut self.graph, dcell, sub, self.level_ports[level as usize])?;
        }
        debug!(level, "DCell level built");

        self.levels.push(dcell);
        Ok(dcell)
    }
}

#[tracing::instrument(skip(opts), fields(k = opts.k, n = opts.n))]
pub fn build_dcell(opts: &DCellOpts) -> Result<DCellTopology, TopoError> {
    let DCellOpts { k, n } = *opts;
    require_level(k)?;
    require_positive("n", n)?;
    // Fails before any allocation if the sizing does not fit.
    let num_servers = dcell_t(k, n)?;

    let mut graph = ComponentGraph::new();
    let container = graph.add_component("dcell");

    let level_ports = add_level_ports(&mut graph, k);

    let switch_port = graph.add_port("port", None);
    let switch = graph.add_switch("switch");
    graph.contains(switch, switch_port, n)?;
    let server = graph.add_end_host("server");
    for port in &level_ports {
        graph.contains(server, *port, 1)?;
    }

    let mut builder = DCellBuilder {
        graph,
        n,
        level_ports,
        switch,
        switch_port,
        server,
        levels: Vec::with_capacity(k as usize + 1),
    };
    let top = builder.build_level(k)?;
    builder.graph.contains(container, top, 1)?;

    info!(num_servers, "DCell built");
    Ok(DCellTopology {
        k,
        n,
        graph: builder.graph,
        container,
        levels: builder.levels,
        level_ports: builder.level_ports,
        switch,
        switch_port,
        server,
    })
}
