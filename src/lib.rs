pub mod connect;
pub mod error;
pub mod tdl;
pub mod topo;

pub use error::TopoError;

#[cfg(test)]
mod test;
