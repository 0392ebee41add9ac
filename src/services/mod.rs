// Service module exports

pub mod markings;
pub mod settings;
