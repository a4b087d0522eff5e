// Route handlers, one file per resource. Wiring lives in `crate::app`.

pub mod auth;
pub mod enhance;
pub mod products;
pub mod reviews;
