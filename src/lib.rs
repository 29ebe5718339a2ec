pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod post_list;
pub mod post_processor;
pub mod publisher;
pub mod slug;
pub mod text_utils;
mod test_data;
