use super::bcube::{BCubeOpts, BCubeTopology, build_bcube};
use super::dcell::{DCellOpts, DCellTopology, build_dcell};
use super::fat_tree::{FatTreeOpts, FatTreeTopology, build_fat_tree};
use crate::error::TopoError;
use crate::tdl::{ComponentGraph, ComponentId, TopologySummary};
use serde::{Deserialize, Serialize};

/// Parameters of one topology, as read from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologySpec {
    #[serde(rename = "bcube")]
    BCube { k: u32, n: u64 },
    #[serde(rename = "dcell")]
    DCell { k: u32, n: u64 },
    FatTree { num_pods: u64 },
}

impl TopologySpec {
    pub fn build(&self) -> Result<AnyTopology, TopoError> {
        match *self {
            TopologySpec::BCube { k, n } => build_bcube(&BCubeOpts { k, n }).map(AnyTopology::BCube),
            TopologySpec::DCell { k, n } => build_dcell(&DCellOpts { k, n }).map(AnyTopology::DCell),
            TopologySpec::FatTree { num_pods } => {
                build_fat_tree(&FatTreeOpts { num_pods }).map(AnyTopology::FatTree)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum AnyTopology {
    BCube(BCubeTopology),
    DCell(DCellTopology),
    FatTree(FatTreeTopology),
}

impl AnyTopology {
    pub fn graph(&self) -> &ComponentGraph {
        match self {
            AnyTopology::BCube(t) => &t.graph,
            AnyTopology::DCell(t) => &t.graph,
            AnyTopology::FatTree(t) => &t.graph,
        }
    }

    pub fn root(&self) -> ComponentId {
        match self {
            AnyTopology::BCube(t) => t.container,
            AnyTopology::DCell(t) => t.container,
            AnyTopology::FatTree(t) => t.root,
        }
    }

    pub fn summarize(&self) -> TopologySummary {
        self.graph().summarize(self.root())
    }
}
