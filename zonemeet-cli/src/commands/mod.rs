pub mod events;
pub mod profiles;
pub mod seed;
