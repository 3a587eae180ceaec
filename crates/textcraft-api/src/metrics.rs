use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, HistogramOpts, Opts, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref TRANSFORMATIONS_TOTAL: Counter =
        Counter::with_opts(Opts::new("transformations_total", "Total number of completed transformations"))
            .unwrap();

    pub static ref GENERATION_FAILURES_TOTAL: Counter =
        Counter::with_opts(Opts::new("generation_failures_total", "Total number of failed generation calls"))
            .unwrap();

    pub static ref GENERATION_DURATION_SECONDS: Histogram =
        Histogram::with_opts(HistogramOpts::new("generation_duration_seconds", "Duration of generation backend calls in seconds"))
            .unwrap();
}

pub fn register_metrics() {
    // register is idempotent enough for our purposes; duplicate
    // registration only happens when tests build several servers
    let _ = REGISTRY.register(Box::new(TRANSFORMATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(GENERATION_FAILURES_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(GENERATION_DURATION_SECONDS.clone()));
}
