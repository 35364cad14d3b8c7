// Domain layer - Core sequencing logic

pub mod errors;
pub mod model;
pub mod rules;
