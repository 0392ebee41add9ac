// Module exports for models

pub mod day_state;
pub mod marking;
pub mod settings;
