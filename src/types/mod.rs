pub mod config;
pub mod dependency;

pub use dependency::{display_list, parse_dependency_list, DependencyAlternatives};
