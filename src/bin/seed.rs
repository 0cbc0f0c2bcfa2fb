//! Seed the initial superadmin account and the student directory

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use campus_library::{
    config::AppConfig,
    models::{student::CreateStudent, superadmin::RegisterSuperadmin},
    repository::Repository,
    services::Services,
};

const FIRST_NIM: u64 = 205410080;

const STUDENTS: [&str; 15] = [
    "Ahmad Rifai",
    "Dewi Lestari",
    "Budi Santoso",
    "Siti Nurhaliza",
    "Hendra Wijaya",
    "Rina Kartika",
    "Bambang Sutrisno",
    "Nurul Hidayah",
    "Joko Widodo",
    "Maya Anggraini",
    "Agus Setiawan",
    "Putri Rahayu",
    "Dian Sastrowardoyo",
    "Rudi Hartono",
    "Lina Wulandari",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "campus_library={},seed={}",
            config.logging.level, config.logging.level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let services = Services::new(Repository::new(pool), &config.auth)
        .context("Failed to create services")?;

    if services.superadmins.count().await? == 0 {
        let admin = RegisterSuperadmin {
            username: "rif123".to_string(),
            password: "perpuskampis".to_string(),
            full_name: "Miftakhul Ilman Rifqi".to_string(),
            role: None,
        };
        admin.validate()?;
        services.superadmins.register(admin).await?;
        tracing::info!("Seeded superadmin rif123");
    } else {
        tracing::info!("Superadmins already present, skipping");
    }

    if services.students.count().await? < STUDENTS.len() as i64 {
        for (offset, name) in STUDENTS.iter().enumerate() {
            let student = CreateStudent {
                full_name: name.to_string(),
                nim: (FIRST_NIM + offset as u64).to_string(),
            };
            student.validate()?;
            match services.students.create(&student).await {
                Ok(_) => {}
                Err(campus_library::AppError::Conflict(_)) => {
                    tracing::debug!(nim = %student.nim, "Student already exists");
                }
                Err(e) => return Err(e.into()),
            }
        }
        tracing::info!("Seeded {} students", STUDENTS.len());
    } else {
        tracing::info!("Students already present, skipping");
    }

    Ok(())
}
