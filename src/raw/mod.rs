mod arena;
mod link;
mod node;
mod raw_chain_map;

pub(crate) use link::Link;
pub use node::Node;
pub(crate) use raw_chain_map::RawChainMap;
