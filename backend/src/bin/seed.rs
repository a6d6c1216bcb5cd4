use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use tracing::info;
use uuid::Uuid;

/// Showtime slots as (hour, minute) in server-local time.
const TIME_SLOTS: [(i64, i64); 5] = [(10, 0), (13, 30), (16, 0), (19, 30), (22, 0)];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    info!("Creating sample data...");

    clear_data(&pool).await?;
    create_users(&pool).await?;
    let movies = create_movies(&pool).await?;
    let theaters = create_theaters(&pool).await?;
    create_showings(&pool, &movies, &theaters).await?;
    create_snacks(&pool).await?;

    info!("Sample data created successfully");
    Ok(())
}

/// Clear existing catalog data. Users are left alone; bookings go with
/// their showings.
async fn clear_data(pool: &PgPool) -> Result<()> {
    info!("Clearing existing data...");

    sqlx::query("DELETE FROM showings").execute(pool).await?;
    sqlx::query("DELETE FROM movies").execute(pool).await?;
    sqlx::query("DELETE FROM theaters").execute(pool).await?;
    sqlx::query("DELETE FROM snack_items").execute(pool).await?;

    Ok(())
}

async fn create_users(pool: &PgPool) -> Result<()> {
    info!("Creating users...");

    ensure_user(pool, "customer", "customer@example.com", "password123", false, false).await?;
    ensure_user(pool, "staff", "staff@example.com", "password123", true, true).await?;

    Ok(())
}

async fn ensure_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
    is_staff_member: bool,
    is_staff: bool,
) -> Result<()> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await?;

    if exists > 0 {
        return Ok(());
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, is_staff_member, is_staff)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(is_staff_member)
    .bind(is_staff)
    .execute(pool)
    .await?;

    info!("Created user: {}", username);
    Ok(())
}

async fn create_movies(pool: &PgPool) -> Result<Vec<(Uuid, i32)>> {
    info!("Creating movies...");

    let movies_data: [(&str, &str, i32, &str); 5] = [
        (
            "The Space Odyssey",
            "A thrilling journey through the cosmos that challenges our understanding of space and time.",
            142,
            "https://example.com/posters/space_odyssey.jpg",
        ),
        (
            "Midnight Mystery",
            "A detective must solve a complex murder case before the clock strikes midnight.",
            115,
            "https://example.com/posters/midnight_mystery.jpg",
        ),
        (
            "The Last Adventure",
            "An epic tale of courage and friendship as heroes embark on their final quest.",
            165,
            "https://example.com/posters/last_adventure.jpg",
        ),
        (
            "Digital Dreams",
            "When virtual reality becomes indistinguishable from reality, one programmer must find a way back.",
            128,
            "https://example.com/posters/digital_dreams.jpg",
        ),
        (
            "Love in Paris",
            "A romantic comedy about finding love in the most unexpected places.",
            110,
            "https://example.com/posters/love_paris.jpg",
        ),
    ];

    let mut created = Vec::with_capacity(movies_data.len());
    for (title, description, duration, poster_url) in movies_data {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO movies (title, description, duration, poster_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(duration)
        .bind(poster_url)
        .fetch_one(pool)
        .await?;

        info!("Created movie: {}", title);
        created.push((id, duration));
    }

    Ok(created)
}

async fn create_theaters(pool: &PgPool) -> Result<Vec<Uuid>> {
    info!("Creating theaters...");

    let theaters_data: [(&str, i32); 4] = [
        ("Grand Theater", 200),
        ("IMAX Experience", 150),
        ("Cozy Cinema", 80),
        ("VIP Screening Room", 40),
    ];

    let mut created = Vec::with_capacity(theaters_data.len());
    for (name, capacity) in theaters_data {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO theaters (name, capacity) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(capacity)
        .fetch_one(pool)
        .await?;

        info!("Created theater: {}", name);
        created.push(id);
    }

    Ok(created)
}

/// Randomized schedule for the next 7 days: per theater per day, 2-3 slots,
/// a random movie, and a random price in [8.50, 15.00].
async fn create_showings(
    pool: &PgPool,
    movies: &[(Uuid, i32)],
    theaters: &[Uuid],
) -> Result<()> {
    info!("Creating showings...");

    let mut rng = rand::thread_rng();
    let today = Local::now().date_naive();

    for day in 0..7 {
        let date = today + Duration::days(day);

        for &theater_id in theaters {
            let slot_count = rng.gen_range(2..=3);
            let slots: Vec<(i64, i64)> = TIME_SLOTS
                .choose_multiple(&mut rng, slot_count)
                .copied()
                .collect();

            for (hour, minute) in slots {
                let &(movie_id, duration) =
                    movies.choose(&mut rng).context("no movies to schedule")?;

                let naive = date.and_time(NaiveTime::MIN)
                    + Duration::hours(hour)
                    + Duration::minutes(minute);
                let start_time = local_to_utc(naive);
                let end_time = start_time + Duration::minutes(duration as i64);

                let price = Decimal::from_f64(rng.gen_range(8.5..15.0))
                    .context("price out of range")?
                    .round_dp(2);

                sqlx::query(
                    r#"
                    INSERT INTO showings (movie_id, theater_id, start_time, end_time, price)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(movie_id)
                .bind(theater_id)
                .bind(start_time)
                .bind(end_time)
                .bind(price)
                .execute(pool)
                .await?;
            }
        }
    }

    Ok(())
}

fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

async fn create_snacks(pool: &PgPool) -> Result<()> {
    info!("Creating snack items...");

    let snacks_data: [(&str, &str, &str, i32); 7] = [
        (
            "Large Popcorn",
            "Freshly popped buttery popcorn in a large bucket",
            "7.99",
            100,
        ),
        (
            "Medium Popcorn",
            "Freshly popped buttery popcorn in a medium bucket",
            "5.99",
            150,
        ),
        (
            "Nachos with Cheese",
            "Crispy tortilla chips with warm cheese sauce",
            "6.50",
            80,
        ),
        ("Large Soda", "Your choice of soda in a large cup", "4.99", 200),
        ("Candy Box", "Assorted movie theater candy", "3.99", 120),
        ("Hot Dog", "Classic hot dog with condiments", "5.50", 60),
        (
            "Ice Cream",
            "Vanilla, chocolate, or strawberry ice cream cup",
            "4.50",
            70,
        ),
    ];

    for (name, description, price, quantity) in snacks_data {
        let price: Decimal = price.parse().context("invalid snack price")?;

        sqlx::query(
            r#"
            INSERT INTO snack_items (name, description, price, quantity_available)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(quantity)
        .execute(pool)
        .await?;

        info!("Created snack item: {}", name);
    }

    Ok(())
}
