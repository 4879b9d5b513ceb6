pub mod model;
pub mod preview;
