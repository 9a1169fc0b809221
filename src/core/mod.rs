// Shared helpers with no engine or game dependencies

pub mod math;
