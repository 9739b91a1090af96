pub mod navigator;
pub mod tracker;

pub use navigator::{NavigationError, RoomNavigator, RoomView};
pub use tracker::NavigationTracker;
