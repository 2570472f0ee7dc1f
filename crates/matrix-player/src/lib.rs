pub mod config;
pub mod decode;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod playlist;
pub mod sink;
pub mod status;
