pub mod config;
pub mod logger;
pub mod error;
pub mod content;
pub mod metadata;
pub mod post;
pub mod post_list;
pub mod post_store;
pub mod friends;
mod text_utils;
mod test_data;

pub use error::{ContentError, MarkdownRenderError};
