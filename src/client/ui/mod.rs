//! Client screens.

mod auth;
mod course;
mod form;
mod home;
mod landing;
mod preview;
mod render;

pub use render::render;
