pub mod garenta;
pub mod traits;
pub mod types;

pub use garenta::GarentaClient;
pub use traits::RentalApi;
pub use types::{SearchPayload, SearchRequest};
