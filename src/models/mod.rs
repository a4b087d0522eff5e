pub mod product;
pub mod review;

pub use product::{NewProduct, Product, ProductId, ProductUpdate};
pub use review::Review;
