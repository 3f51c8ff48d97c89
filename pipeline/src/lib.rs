pub mod archive;
pub mod extract;
pub mod options;
pub mod persistance;
pub mod postprocess;

pub use archive::*;
pub use extract::*;
pub use options::*;
pub use persistance::*;
pub use postprocess::*;
