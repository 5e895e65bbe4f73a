//! Prometheus registry behind `/metrics`.
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    pub requests: IntCounterVec,
    pub dashboard_seconds: Histogram,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("dineboard_http_requests_total", "HTTP requests by route and status"),
            &["route", "status"],
        )?;
        let dashboard_seconds = Histogram::with_opts(HistogramOpts::new(
            "dineboard_dashboard_build_seconds",
            "Time spent building dashboard reports",
        ))?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(dashboard_seconds.clone()))?;

        Ok(Self {
            registry,
            requests,
            dashboard_seconds,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        encode(&self.registry)
    }
}

pub fn encode(registry: &Registry) -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}
