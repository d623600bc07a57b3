/// Overrides the asset directory checked by the verifier.
pub const ASSETS_DIR_ENV: &str = "SYS_ASSETS_DIR";

/// Optional list of asset names that must exist under the asset directory.
pub const EXPECTED_ASSETS_ENV: &str = "SYS_EXPECTED_ASSETS";

/// Overrides the program invoked as the compiler toolchain.
pub const TOOLCHAIN_BIN_ENV: &str = "SYS_TOOLCHAIN_BIN";

pub const DEFAULT_ASSETS_DIR: &str = "./assets";

pub const DEFAULT_TOOLCHAIN_BIN: &str = "go";

/// Identifies this orchestrator build, independent of the toolchain it drives.
pub const ORCHESTRATOR_VERSION: &str = concat!("sys-compiler-v", env!("CARGO_PKG_VERSION"));
