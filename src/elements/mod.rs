pub mod color;
mod edge;
mod node;

pub use self::color::{EdgeColor, NodeColor};
pub use self::edge::{Edge, EdgeId};
pub use self::node::{Node, NodeId};
