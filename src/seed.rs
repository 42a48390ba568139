/*
 * Responsibility
 * - `seed` サブコマンド: users / addresses にサンプルデータを投入
 * - 既存の users は全削除してから作り直す (addresses は cascade)
 * - 全員のパスワードは SEED_PASSWORD (login の動作確認用)
 */
use chrono::{DateTime, TimeDelta, Utc};

use crate::app;
use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::repos::{NewAddress, NewUser, PgUserRepo, UserRepo, error::RepoError};
use crate::services::auth::hash_password;

pub const DEFAULT_USERS: usize = 50;
pub const DEFAULT_ADDRESSES: usize = 1;

/// Password shared by every seeded user.
pub const SEED_PASSWORD: &str = "123abcd";

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Hugo", "Isabel", "Joao",
];
const LAST_NAMES: &[&str] = &[
    "Almeida", "Barbosa", "Costa", "Dias", "Ferreira", "Gomes", "Lima", "Moreira", "Pereira",
    "Souza",
];
const STREETS: &[&str] = &[
    "Rua Augusta",
    "Avenida Paulista",
    "Rua das Flores",
    "Rua XV de Novembro",
    "Avenida Atlantica",
    "Rua da Consolacao",
];
const NEIGHBORHOODS: &[&str] = &["Centro", "Jardins", "Copacabana", "Savassi", "Batel"];
const CITIES: &[(&str, &str)] = &[
    ("Sao Paulo", "SP"),
    ("Rio de Janeiro", "RJ"),
    ("Belo Horizonte", "MG"),
    ("Curitiba", "PR"),
    ("Porto Alegre", "RS"),
];

pub async fn run(users: usize, addresses: usize) -> Result<(), AppError> {
    app::init_tracing();

    let config = DatabaseConfig::from_env()?;
    let repo = PgUserRepo::new(app::connect_db(&config).await?);

    // Hashed once, shared by every seeded user.
    let password_hash = hash_password(SEED_PASSWORD)?;
    let created = populate(
        &repo,
        sample_users(users, addresses, &password_hash, Utc::now()),
    )
    .await?;

    tracing::info!(users = created, addresses_per_user = addresses, "database seeded");
    Ok(())
}

/// Replace every stored user with `users`.
pub(crate) async fn populate(repo: &dyn UserRepo, users: Vec<NewUser>) -> Result<usize, RepoError> {
    let removed = repo.delete_all().await?;
    if removed > 0 {
        tracing::info!(removed, "existing users removed");
    }

    let mut created = 0;
    for user in users {
        repo.create(user).await?;
        created += 1;
    }

    Ok(created)
}

pub(crate) fn sample_users(
    count: usize,
    addresses_per_user: usize,
    password_hash: &str,
    now: DateTime<Utc>,
) -> Vec<NewUser> {
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
            // 18 to 80 years old
            let age_days = 18 * 365 + (i * 7919) % (62 * 365);

            NewUser {
                name: format!("{first} {last}"),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    i
                ),
                password_hash: password_hash.to_string(),
                birth_date: now - TimeDelta::days(age_days as i64),
                addresses: (0..addresses_per_user)
                    .map(|j| sample_address(i, j))
                    .collect(),
            }
        })
        .collect()
}

fn sample_address(user: usize, nth: usize) -> NewAddress {
    let n = user * 31 + nth * 17;
    let (city, state) = CITIES[n % CITIES.len()];

    NewAddress {
        label: (nth > 0).then(|| format!("Address {}", nth + 1)),
        cep: format!("{:05}-{:03}", (user * 7907 + nth * 131) % 100_000, n % 1000),
        street: STREETS[n % STREETS.len()].to_string(),
        street_number: (1 + n % 2000) as i32,
        complement: None,
        neighborhood: NEIGHBORHOODS[(user + nth) % NEIGHBORHOODS.len()].to_string(),
        city: city.to_string(),
        state: state.to_string(),
    }
}
