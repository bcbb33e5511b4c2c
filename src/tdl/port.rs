//! 端口定义

use super::id::PortId;
use serde::Serialize;

/// Nominal line rate of a port. Metadata only; nothing in the generators
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortSpeed {
    OneGbps,
    TenGbps,
    FortyGbps,
    HundredGbps,
}

impl PortSpeed {
    pub fn gbps(self) -> u64 {
        match self {
            PortSpeed::OneGbps => 1,
            PortSpeed::TenGbps => 10,
            PortSpeed::FortyGbps => 40,
            PortSpeed::HundredGbps => 100,
        }
    }
}

/// A named connection terminal. Owned by exactly one component once it has
/// been placed with [`ComponentGraph::contains`](super::ComponentGraph::contains).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<PortSpeed>,
}
