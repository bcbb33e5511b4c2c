//! Fat-tree 拓扑构建
//!
//! 两层结构：每个 pod 内 k/2 台汇聚交换机与 k/2 台 ToR 交换机全互连，
//! 每个 pod 再与 (k/2)^2 台 spine 交换机各连一条链路。

use super::{CONNECTIONS_PER_PAIR, connect_every_pair};
use crate::connect::{Connector, exactly_x_connections};
use crate::error::TopoError;
use crate::tdl::{ComponentGraph, ComponentId, PortId, PortSpeed};
use tracing::info;

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub num_pods: u64,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self { num_pods: 4 }
    }
}

/// Switch counts derived from the pod count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatTreeSizing {
    pub ports_per_switch: u64,
    pub switches_per_layer_per_pod: u64,
    pub num_spine_switches: u64,
}

impl FatTreeSizing {
    /// Plain integer division; an odd pod count truncates and the spine
    /// count saturates. `build_fat_tree` goes through `checked_from_pods`.
    pub fn from_pods(num_pods: u64) -> Self {
        let half = num_pods / 2;
        Self {
            ports_per_switch: num_pods,
            switches_per_layer_per_pod: half,
            num_spine_switches: half.saturating_mul(half),
        }
    }

    /// Same sizing, but fails when the spine count or any topology-wide
    /// total (switches, links) does not fit in a `u64`.
    pub fn checked_from_pods(num_pods: u64) -> Result<Self, TopoError> {
        let half = num_pods / 2;
        let num_spine_switches = half
            .checked_mul(half)
            .ok_or_else(|| overflow("spine switch count"))?;

        let pod_switches = num_pods
            .checked_mul(half)
            .and_then(|per_layer| per_layer.checked_mul(2))
            .ok_or_else(|| overflow("pod switch count"))?;
        pod_switches
            .checked_add(num_spine_switches)
            .ok_or_else(|| overflow("switch count"))?;
        // agg-ToR links inside pods plus pod-spine links, num_pods * half^2 each
        num_pods
            .checked_mul(num_spine_switches)
            .and_then(|per_layer| per_layer.checked_mul(2))
            .ok_or_else(|| overflow("link count"))?;

        Ok(Self {
            ports_per_switch: num_pods,
            switches_per_layer_per_pod: half,
            num_spine_switches,
        })
    }
}

fn overflow(what: &str) -> TopoError {
    TopoError::Overflow {
        what: format!("FatTree {}", what),
    }
}

#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    pub num_pods: u64,
    pub sizing: FatTreeSizing,
    pub graph: ComponentGraph,
    pub root: ComponentId,
    pub pod: ComponentId,
    pub agg_switch: ComponentId,
    pub agg_port: PortId,
    pub tor_switch: ComponentId,
    pub tor_port: PortId,
    pub spine_switch: ComponentId,
    pub spine_port: PortId,
}

/// A switch template owning `num_ports` 40G ports.
fn add_fat_tree_switch(
    graph: &mut ComponentGraph,
    name: &str,
    num_ports: u64,
) -> Result<(ComponentId, PortId), TopoError> {
    let sw = graph.add_switch(name);
    let port = graph.add_port("port40GE-", Some(PortSpeed::FortyGbps));
    graph.contains(sw, port, num_ports)?;
    Ok((sw, port))
}

#[tracing::instrument(skip(opts), fields(num_pods = opts.num_pods))]
pub fn build_fat_tree(opts: &FatTreeOpts) -> Result<FatTreeTopology, TopoError> {
    let num_pods = opts.num_pods;
    if num_pods < 2 || num_pods % 2 != 0 {
        return Err(TopoError::InvalidParameter {
            name: "num_pods",
            reason: format!("must be even and >= 2, got {}", num_pods),
        });
    }
    let sizing = FatTreeSizing::checked_from_pods(num_pods)?;

    let mut graph = ComponentGraph::new();
    let root = graph.add_component("fattree");

    // pod: every agg connects to every ToR
    let (agg_switch, agg_port) = add_fat_tree_switch(&mut graph, "agg-sw", sizing.ports_per_switch)?;
    let (tor_switch, tor_port) = add_fat_tree_switch(&mut graph, "tor-sw", sizing.ports_per_switch)?;
    let pod = graph.add_component("pod");
    graph.contains(pod, agg_switch, sizing.switches_per_layer_per_pod)?;
    graph.contains(pod, tor_switch, sizing.switches_per_layer_per_pod)?;
    connect_every_pair(&mut graph, pod, (agg_switch, agg_port), (tor_switch, tor_port))?;

    let (spine_switch, spine_port) =
        add_fat_tree_switch(&mut graph, "spine-sw", sizing.ports_per_switch)?;
    graph.contains(root, spine_switch, sizing.num_spine_switches)?;
    graph.contains(root, pod, num_pods)?;

    // Declared per pod rather than per agg switch; the pod side lands on an
    // agg port. The rule lists the spine first, the wiring lists the pod first.
    let mut constraints = Vec::new();
    exactly_x_connections(&mut constraints, spine_switch, pod, CONNECTIONS_PER_PAIR)?;
    let mut connector = Connector::new();
    connector.add_component_pair_to_connect(pod, spine_switch, agg_port, spine_port);
    connector.add_constraints(constraints);
    graph.add_connector(root, connector)?;

    info!(
        ports_per_switch = sizing.ports_per_switch,
        switches_per_layer_per_pod = sizing.switches_per_layer_per_pod,
        num_spine_switches = sizing.num_spine_switches,
        "FatTree built"
    );
    Ok(FatTreeTopology {
        num_pods,
        sizing,
        graph,
        root,
        pod,
        agg_switch,
        agg_port,
        tor_switch,
        tor_port,
        spine_switch,
        spine_port,
    })
}
