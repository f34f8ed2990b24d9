//! Domain layer: value objects and pure algorithms of image analysis.
pub mod domain;
pub mod services;
