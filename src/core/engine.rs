use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives a pipeline through its three phases, logging progress and
/// optionally system stats between phases.
pub struct TrackerEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> TrackerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting scrape run");

        let scraped = self.pipeline.extract().await?;
        tracing::info!("Extracted {} raw entries", scraped.len());
        self.monitor.log_stats("extract");

        let result = self.pipeline.transform(scraped).await?;
        tracing::info!(
            "Transform complete: {} active, {} archived, {} new",
            result.active.len(),
            result.archive.len(),
            result.new_count
        );
        self.monitor.log_stats("transform");

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Data saved to {}", output_path);
        self.monitor.log_stats("load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
