pub mod controller;
pub mod navigation;
