mod build;
mod info;
mod verify;
mod version;

pub use build::{ToolchainOptions, cmd_build, cmd_clean, cmd_cross};
pub use info::cmd_info;
pub use verify::cmd_verify;
pub use version::cmd_version;
