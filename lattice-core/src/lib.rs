pub mod error;
pub mod params;
pub mod zq;
pub mod sampling;
pub mod vector_matrix;
pub mod special_product;
pub mod hashing;

pub use error::LatticeError;
pub use params::LatticeParams;
pub use special_product::special_product;
pub use vector_matrix::Matrix;
pub use zq::centered_mod;
