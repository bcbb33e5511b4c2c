//! 拓扑描述原语
//!
//! 组件、端口及其包含关系。所有对象存放在 `ComponentGraph` 中，
//! 通过 `ComponentId` / `PortId` 引用。

// 子模块声明
mod component;
mod graph;
mod id;
mod port;

// 重新导出公共接口
pub use component::{Child, Component, ComponentKind, Containment};
pub use graph::{ComponentGraph, TopologySummary};
pub use id::{ComponentId, PortId};
pub use port::{Port, PortSpeed};
