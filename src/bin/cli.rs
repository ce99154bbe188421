use clap::Parser;
use realmgen::{WorldGenerationParams, generate_world};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Генератор карт стран
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (по умолчанию — встроенные настройки)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Путь для сохранения карты в JSON
    #[arg(short, long, default_value = "world.json")]
    output: PathBuf,

    /// Сид (перекрывает значение из конфигурации)
    #[arg(long)]
    seed: Option<u64>,

    /// Количество стран (перекрывает значение из конфигурации)
    #[arg(long)]
    countries: Option<usize>,

    /// Ширина карты в клетках
    #[arg(long)]
    width: Option<u32>,

    /// Высота карты в клетках
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!("🔍 Загрузка конфигурации...");
    let mut params = match &cli.config {
        Some(path) => WorldGenerationParams::from_toml_file(path)?,
        None => WorldGenerationParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = Some(seed);
    }
    if let Some(countries) = cli.countries {
        params.country_count = countries;
    }
    if let Some(width) = cli.width {
        params.width = width;
    }
    if let Some(height) = cli.height {
        params.height = height;
    }

    tracing::info!(
        "Генерация карты {}×{}, стран: {}...",
        params.width,
        params.height,
        params.country_count
    );
    let world = generate_world(&params)?;

    let coastal = world.regions.iter().filter(|r| r.is_coastal()).count();
    tracing::info!(
        "Стран: {} (с выходом к морю: {}), клеток суши: {}",
        world.regions.len(),
        coastal,
        world.land_cells()
    );

    tracing::info!("Сохранение в {:?}", cli.output);
    let writer = BufWriter::new(File::create(&cli.output)?);
    serde_json::to_writer(writer, &world)?;

    tracing::info!("Готово! Карта сохранена.");
    Ok(())
}
