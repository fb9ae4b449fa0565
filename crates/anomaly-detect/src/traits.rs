//! Core traits for table detectors

/// Static properties of a detection algorithm
pub trait DetectorProperties {
    /// Algorithm name for reporting
    fn algorithm_name(&self) -> &'static str;

    /// Minimum number of rows the algorithm needs
    fn minimum_sample_size(&self) -> usize {
        1
    }
}

/// Detectors whose behavior is driven by a parameters struct
pub trait ConfigurableDetector {
    /// Parameter type for this detector
    type Parameters;

    /// Create a detector from parameters
    fn with_parameters(params: Self::Parameters) -> Self;

    /// Current parameters
    fn parameters(&self) -> &Self::Parameters;

    /// Replace the parameters
    fn set_parameters(&mut self, params: Self::Parameters);
}
