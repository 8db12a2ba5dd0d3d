/// Configuration for a `fit` run.
///
/// # Fields
/// - `epochs`    — total number of full passes over the training data
/// - `log_every` — an `info!` summary is logged every `log_every` epochs
///                 (and after the last one); `0` disables the summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: 0,
        }
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}
