//! 标识符类型
//!
//! 组件与端口在 `ComponentGraph` 中的索引。

use serde::Serialize;

/// 组件标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentId(pub usize);

/// 端口标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PortId(pub usize);
