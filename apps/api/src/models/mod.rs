pub mod filters;
pub mod profile;
pub mod score;
