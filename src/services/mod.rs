// Service module exports

pub mod clock;
pub mod layout;
pub mod settings;
