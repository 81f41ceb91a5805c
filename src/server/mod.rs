pub mod router;
pub mod routes;

pub use router::{LuminousState, luminous_router};
