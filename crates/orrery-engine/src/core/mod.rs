pub mod picking;
pub mod scene;
pub mod transform;
