pub mod games;
pub mod policy_file;
pub mod scan;
pub mod util;

pub use games::*;
pub use policy_file::*;
pub use scan::*;
pub use util::*;
