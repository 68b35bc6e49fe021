//! Regression test parameters and operations

use crate::error::TestError;
use chromakey_core::{Image, Rgb};

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and recorded failures.
pub struct RegParams {
    /// Name of the test (e.g., "key")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Installs the test log subscriber on first use.
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();
        tracing::info!("////////////////   {}_reg   ///////////////", test_name);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, err: TestError) {
        tracing::error!("Failure in {}_reg: {}", self.test_name, err);
        self.failures.push(err);
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never matches
        if diff <= delta {
            true
        } else {
            self.fail(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        }
    }

    /// Compare two colors channel by channel for exact equality
    pub fn compare_colors(&mut self, expected: Rgb, actual: Rgb) -> bool {
        let mut same = true;
        for (e, a) in expected.channels().into_iter().zip(actual.channels()) {
            same &= self.compare_values(e as f64, a as f64, 0.0);
        }
        same
    }

    /// Compare two images sample by sample
    ///
    /// # Arguments
    ///
    /// * `expected` - Reference image
    /// * `actual` - Computed image
    /// * `delta` - Maximum allowed difference per sample
    ///
    /// # Returns
    ///
    /// `true` if the shapes match and every sample is within delta.
    pub fn compare_images(&mut self, expected: &Image, actual: &Image, delta: f32) -> bool {
        self.index += 1;

        let same_shape = expected.batch() == actual.batch()
            && expected.dimensions() == actual.dimensions()
            && expected.channels() == actual.channels();
        if !same_shape {
            tracing::debug!(
                expected = ?(expected.batch(), expected.dimensions(), expected.channels()),
                actual = ?(actual.batch(), actual.dimensions(), actual.channels()),
                "shape mismatch"
            );
            self.fail(TestError::ImageMismatch { index: self.index });
            return false;
        }

        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(e, a)| !((e - a).abs() <= delta));
        match mismatch {
            None => true,
            Some(pos) => {
                tracing::debug!(
                    sample = pos,
                    expected = expected.data()[pos],
                    actual = actual.data()[pos],
                    "sample mismatch"
                );
                self.fail(TestError::ImageMismatch { index: self.index });
                false
            }
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            tracing::info!("SUCCESS: {}_reg", self.test_name);
            true
        } else {
            tracing::error!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                tracing::error!("  {}", failure);
            }
            false
        }
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}
