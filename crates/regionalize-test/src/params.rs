use crate::error::{TestError, TestResult};
use crate::{golden_dir, init_tracing, regout_dir};
use regionalize_core::Pix;
use regionalize_io::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// What a run does with the files it writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Overwrite the golden files
    Generate,
    #[default]
    Compare,
    /// Write outputs only
    Display,
}

impl RegTestMode {
    /// Mode named by `REGTEST_MODE`, case-insensitive.
    pub fn from_env() -> Self {
        let Ok(value) = std::env::var("REGTEST_MODE") else {
            return Self::default();
        };
        if value.eq_ignore_ascii_case("generate") {
            Self::Generate
        } else if value.eq_ignore_ascii_case("display") {
            Self::Display
        } else {
            Self::Compare
        }
    }
}

/// State of one regression test
pub struct RegParams {
    pub test_name: String,
    pub mode: RegTestMode,
    /// Number of the latest check; starts at 1
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    pub fn new(test_name: &str) -> Self {
        init_tracing();
        let mode = RegTestMode::from_env();
        for dir in [golden_dir(), regout_dir()] {
            if let Err(err) = fs::create_dir_all(&dir) {
                eprintln!("cannot create {}: {err}", dir.display());
            }
        }
        eprintln!("\n==== {test_name}_reg ({mode:?}) ====");
        Self {
            test_name: test_name.to_owned(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Advance to the next check and record `detail` as its failure if
    /// `passed` is false.
    fn record(&mut self, passed: bool, detail: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if !passed {
            let line = format!("{}_reg #{}: {}", self.test_name, self.index, detail());
            eprintln!("{line}");
            self.failures.push(line);
        }
        passed
    }

    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.record(condition, || format!("expected {what}"))
    }

    /// Check `actual` lies within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.record(diff <= delta, || {
            format!("got {actual}, expected {expected} (off by {diff}, allowed {delta})")
        })
    }

    /// Check two rasters agree in size, depth and every pixel.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        match mismatch(expected, actual) {
            None => self.record(true, String::new),
            Some(reason) => self.record(false, || reason),
        }
    }

    fn output_path(&self, index: usize, format: ImageFormat) -> PathBuf {
        regout_dir().join(format!(
            "{}.{index:02}.{}",
            self.test_name,
            format.extension()
        ))
    }

    /// File written by the latest [`write_pix_and_check`](Self::write_pix_and_check).
    pub fn last_output_path(&self, format: ImageFormat) -> PathBuf {
        self.output_path(self.index, format)
    }

    /// Write `pix` to the regout directory, then handle it according to
    /// the mode. A missing golden file is reported but does not fail.
    pub fn write_pix_and_check(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        let path = self.output_path(self.index + 1, format);
        regionalize_io::write_image(pix, &path, format).map_err(|source| {
            TestError::ImageWrite {
                path: path.clone(),
                source,
            }
        })?;

        let golden = golden_dir().join(format!(
            "{}_golden.{:02}.{}",
            self.test_name,
            self.index + 1,
            format.extension()
        ));
        match self.mode {
            RegTestMode::Display => {
                self.index += 1;
            }
            RegTestMode::Generate => {
                fs::copy(&path, &golden)?;
                eprintln!("wrote {}", golden.display());
                self.index += 1;
            }
            RegTestMode::Compare if !golden.exists() => {
                eprintln!(
                    "no golden file {}; rerun with REGTEST_MODE=generate",
                    golden.display()
                );
                self.index += 1;
            }
            RegTestMode::Compare => {
                let same = fs::read(&path)? == fs::read(&golden)? || same_pixels(&path, &golden);
                self.record(same, || {
                    format!("{} differs from {}", path.display(), golden.display())
                });
            }
        }
        Ok(())
    }

    /// Decode an image this run wrote.
    pub fn read_back(&self, path: impl AsRef<Path>) -> TestResult<Pix> {
        let path = path.as_ref();
        regionalize_io::read_image(path).map_err(|source| TestError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Print the outcome; `true` when every check passed.
    pub fn cleanup(self) -> bool {
        let verdict = if self.is_success() { "SUCCESS" } else { "FAILURE" };
        eprintln!("{verdict}: {}_reg ({} checks)", self.test_name, self.index);
        for failure in &self.failures {
            eprintln!("  {failure}");
        }
        self.is_success()
    }
}

/// Files that differ byte-wise may still decode to the same raster.
fn same_pixels(a: &Path, b: &Path) -> bool {
    match (regionalize_io::read_image(a), regionalize_io::read_image(b)) {
        (Ok(a), Ok(b)) => mismatch(&a, &b).is_none(),
        _ => false,
    }
}

fn mismatch(expected: &Pix, actual: &Pix) -> Option<String> {
    if !expected.sizes_equal(actual) {
        return Some(format!(
            "raster {}x{}@{} vs {}x{}@{}",
            expected.width(),
            expected.height(),
            expected.depth().bits(),
            actual.width(),
            actual.height(),
            actual.depth().bits()
        ));
    }
    (0..expected.height())
        .flat_map(|y| (0..expected.width()).map(move |x| (x, y)))
        .find(|&(x, y)| expected.get_pixel_unchecked(x, y) != actual.get_pixel_unchecked(x, y))
        .map(|(x, y)| format!("first pixel mismatch at ({x}, {y})"))
}
