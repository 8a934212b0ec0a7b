pub mod catalog;
pub mod normalize;
pub mod orchestrator;
pub mod postprocess;
pub mod service;

pub use catalog::{list_cities, resolve_branches};
pub use normalize::normalize;
pub use orchestrator::{search, sweep, BranchSweep};
pub use postprocess::finalize;
pub use service::RentalService;
