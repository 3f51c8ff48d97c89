//! Reading and writing of Smart Game Format (FF[4]) game trees.

mod coordinate;
mod game_record;
mod node;
mod parser;
mod writer;

pub use coordinate::*;
pub use game_record::*;
pub use node::*;
pub use parser::*;
pub use writer::*;
