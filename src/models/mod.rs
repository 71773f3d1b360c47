pub mod host;
pub mod scan_result;
pub mod vulnerability;

pub use host::*;
pub use scan_result::*;
pub use vulnerability::*;
