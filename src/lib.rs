pub mod app;
pub mod assets;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod film_box;
pub mod geometry;
pub mod media;
pub mod menubar;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod types;
pub mod universe;
