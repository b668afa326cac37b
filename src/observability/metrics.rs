use prometheus::{Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub phone_lookups_total: IntCounterVec,
    pub bookings_total: IntCounterVec,
    pub booking_latency_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let phone_lookups_total = IntCounterVec::new(
            Opts::new("phone_lookups_total", "Total phone lookups by outcome"),
            &["outcome"],
        )
        .expect("valid phone_lookups_total metric");

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Total booking submissions by outcome"),
            &["outcome"],
        )
        .expect("valid bookings_total metric");

        let booking_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "booking_latency_seconds",
                "Latency of booking submission handling in seconds",
            ),
            &["outcome"],
        )
        .expect("valid booking_latency_seconds metric");

        registry
            .register(Box::new(phone_lookups_total.clone()))
            .expect("register phone_lookups_total");
        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(booking_latency_seconds.clone()))
            .expect("register booking_latency_seconds");

        Self {
            registry,
            phone_lookups_total,
            bookings_total,
            booking_latency_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
