pub mod audit;
pub mod event;
pub mod group;
pub mod user;
pub mod views;
