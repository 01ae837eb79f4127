pub mod video;

pub use video::{NewVideo, VideoRecord};
