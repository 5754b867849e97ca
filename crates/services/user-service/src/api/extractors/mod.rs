//! Custom request extractors.

mod json_body;
mod user_id_path;

pub use json_body::JsonBody;
pub use user_id_path::UserIdPath;
