pub mod carousel;
pub mod frame;
pub mod section;
pub mod tracker;
pub mod video;
