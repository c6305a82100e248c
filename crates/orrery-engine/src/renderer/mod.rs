pub mod camera;
pub mod controls;
pub mod instance;
