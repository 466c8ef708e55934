pub mod controller;
pub mod host;
pub mod scripted;
