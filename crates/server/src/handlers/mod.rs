//! Request handlers.

pub mod common;
pub mod diagnostics;
pub mod files;
pub mod quota;

pub use diagnostics::{health_check, list_orphans};
pub use files::{list_files, purge_file, recover_file, soft_delete_file, upload_file};
pub use quota::get_quota;
