use clap::{Parser, ValueEnum};
use impact_sim_core::lookup::{FixedEnvironment, UniformPopulation, Unavailable};
use impact_sim_core::{
    BurstModeRequest, EnvironmentResolver, GeodataClient, GeodataConfig, ImpactModelConfig,
    ImpactOrchestrator, ImpactRequest, PopulationResolver,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Land/water handling for the impact point
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Environment {
    /// Ask the geodata service (falls back to land)
    Lookup,
    Land,
    Water,
}

/// Asteroid impact effects calculator
#[derive(Parser, Debug)]
#[command(name = "impact-demo")]
#[command(about = "Asteroid impact effects with casualty estimates", long_about = None)]
struct Args {
    /// Impact latitude in degrees
    #[arg(long, default_value_t = 40.7128, allow_negative_numbers = true)]
    lat: f64,

    /// Impact longitude in degrees
    #[arg(long, default_value_t = -74.006, allow_negative_numbers = true)]
    lng: f64,

    /// Impactor diameter in meters
    #[arg(short, long, default_value_t = 100.0)]
    diameter: f64,

    /// Entry speed in m/s
    #[arg(short, long, default_value_t = 20_000.0)]
    speed: f64,

    /// Entry angle from horizontal in degrees
    #[arg(short, long, default_value_t = 45.0)]
    angle: f64,

    /// Material (comet, carbonaceous, stony, stony-iron, iron, gold)
    #[arg(short, long)]
    material: Option<String>,

    /// Explicit bulk density in kg/m³
    #[arg(long)]
    density: Option<f64>,

    /// Burst regime (auto, surface, air)
    #[arg(long, default_value = "auto")]
    mode: BurstModeRequest,

    /// Land/water handling
    #[arg(short, long, value_enum, default_value_t = Environment::Lookup)]
    environment: Environment,

    /// Water depth in meters for ocean impacts
    #[arg(long)]
    water_depth: Option<f64>,

    /// Ranges in meters for the per-distance sample table
    #[arg(long, value_delimiter = ',')]
    distances: Vec<f64>,

    /// Skip the geodata service; land unless --environment water
    #[arg(long)]
    offline: bool,

    /// Uniform population density (people per km²) used with --offline
    #[arg(long)]
    population_density: Option<f64>,

    /// Geodata service base URL (default: IMPACT_GEODATA_URL or built-in)
    #[arg(long)]
    geodata_url: Option<String>,

    /// JSON file overriding model parameters
    #[arg(long)]
    model_config: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(short, long)]
    pretty: bool,
}

impl Args {
    fn request(&self) -> ImpactRequest {
        let mut request = ImpactRequest::new(self.lat, self.lng, self.diameter, self.speed, self.angle)
            .with_mode(self.mode)
            .with_distances(self.distances.clone());
        request.material.clone_from(&self.material);
        request.density = self.density;
        match self.environment {
            Environment::Lookup if self.offline => request = request.with_water(false, None),
            Environment::Lookup => request.water_depth = self.water_depth,
            Environment::Land => request = request.with_water(false, None),
            Environment::Water => request = request.with_water(true, self.water_depth),
        }
        request
    }

    fn model(&self) -> Result<ImpactModelConfig, Box<dyn std::error::Error>> {
        match &self.model_config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&raw)?)
            }
            None => Ok(ImpactModelConfig::default()),
        }
    }

    fn geodata(&self) -> GeodataConfig {
        match &self.geodata_url {
            Some(url) => GeodataConfig::with_base_url(url.as_str()),
            None => GeodataConfig::from_env(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let request = args.request();
    let model = args.model()?;
    let geodata = args.geodata();

    let environment: Arc<dyn EnvironmentResolver>;
    let population: Arc<dyn PopulationResolver>;
    if args.offline {
        environment = Arc::new(FixedEnvironment(false));
        population = match args.population_density {
            Some(density) => Arc::new(UniformPopulation::new(density)),
            None => Arc::new(Unavailable),
        };
    } else {
        let client = Arc::new(GeodataClient::new(&geodata)?);
        environment = client.clone();
        population = client;
    }

    let orchestrator = ImpactOrchestrator::new(environment, population)
        .with_model(model)
        .with_timeouts(geodata.environment_timeouts, geodata.population_timeouts);

    let report = orchestrator.run(&request).await?;
    let json = if args.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{json}");
    Ok(())
}
