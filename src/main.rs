use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use benchmark_helper::{bench_async, BenchmarkRegistry};
use project_alpha::config::AppConfig;
use project_alpha::{metrics, utils};

struct BenchmarkDemo {
    config: AppConfig,
    registry: BenchmarkRegistry,
}

impl BenchmarkDemo {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            registry: BenchmarkRegistry::new(),
        }
    }

    async fn run(&mut self) -> anyhow::Result<()> {
        let demo = self.config.demo.clone();
        info!(
            iterations = demo.iterations,
            sections = demo.sections.len(),
            "Running benchmark demo"
        );

        for iteration in 0..demo.iterations {
            for (index, section) in demo.sections.iter().enumerate() {
                // Stagger the simulated work so sections report distinct averages.
                let work = Duration::from_millis(demo.work_ms * (index as u64 + 1) + iteration as u64);
                bench_async!(self.registry, section, sleep(work))?;
            }
        }

        info!("Benchmark demo completed");
        Ok(())
    }

    fn report(&self) -> anyhow::Result<()> {
        let report = self
            .registry
            .report()?
            .with_config(self.config.report.clone());

        print!("{}", report);
        metrics::publish_report(&report);
        debug!(report = %serde_json::to_string(&report)?, "Benchmark report");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = utils::config_path_from_args(std::env::args());
    let config = AppConfig::load(config_path.as_deref())?;

    utils::init_tracing(&config.log_level);
    info!("Starting {} v{}", project_alpha::NAME, project_alpha::VERSION);

    let mut demo = BenchmarkDemo::new(config);
    demo.run().await?;
    demo.report()?;

    Ok(())
}
