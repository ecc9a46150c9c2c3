//! Regression harness shared by the workspace's `*_reg` tests
//!
//! A [`RegParams`] numbers every check it performs, collects failures
//! instead of panicking, and reports them in [`RegParams::cleanup`].
//! Rasters written with [`RegParams::write_pix_and_check`] land in
//! `tests/regout/` and are checked against `tests/golden/`.
//!
//! `REGTEST_MODE` picks the mode: `compare` (default), `generate` to
//! refresh the golden files, or `display` to only write outputs.
//! `RUST_LOG` filters library logging (default `warn`).
//!
//! ```ignore
//! use regionalize_test::RegParams;
//!
//! let mut rp = RegParams::new("chessboard");
//! rp.compare_values(64.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use std::path::PathBuf;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through libtest's capture. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn tests_dir() -> PathBuf {
    // crates/regionalize-test -> workspace root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests")
}

/// Directory holding reference outputs.
pub fn golden_dir() -> PathBuf {
    tests_dir().join("golden")
}

/// Directory the current run writes its outputs to.
pub fn regout_dir() -> PathBuf {
    tests_dir().join("regout")
}
