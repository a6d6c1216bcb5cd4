use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;

mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod models;
mod policy;
mod utils;

use crate::config::AppConfig;
use crate::database::Database;
use crate::error::AppError;
use crate::utils::jwt::JwtService;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting cinema booking backend on {}:{}",
        config.host, config.port
    );

    let database = Database::new(&config.database_url).await?;
    database.migrate().await?;

    let jwt_service = JwtService::new(&config.jwt_secret)?;

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(database.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .service(
                web::scope("/api")
                    .route("/health/", web::get().to(handlers::health::health_check))
                    .service(
                        web::scope("/users")
                            .route("/login/", web::post().to(handlers::users::login))
                            .route("/signup/", web::post().to(handlers::users::signup))
                            .route("/create/", web::post().to(handlers::users::create_user))
                            .route("/", web::get().to(handlers::users::list_users)),
                    )
                    .service(
                        web::scope("/movies")
                            .route("/movies/", web::get().to(handlers::movies::list_movies))
                            .route("/movies/", web::post().to(handlers::movies::create_movie))
                            .route("/movies/{id}/", web::get().to(handlers::movies::get_movie))
                            .route("/movies/{id}/", web::put().to(handlers::movies::update_movie))
                            .route(
                                "/movies/{id}/",
                                web::delete().to(handlers::movies::delete_movie),
                            )
                            .route(
                                "/theaters/",
                                web::get().to(handlers::theaters::list_theaters),
                            )
                            .route(
                                "/theaters/",
                                web::post().to(handlers::theaters::create_theater),
                            )
                            .route(
                                "/theaters/{id}/",
                                web::get().to(handlers::theaters::get_theater),
                            )
                            .route(
                                "/theaters/{id}/",
                                web::put().to(handlers::theaters::update_theater),
                            )
                            .route(
                                "/theaters/{id}/",
                                web::delete().to(handlers::theaters::delete_theater),
                            )
                            .route(
                                "/showings/",
                                web::get().to(handlers::showings::list_showings),
                            )
                            .route(
                                "/showings/",
                                web::post().to(handlers::showings::create_showing),
                            )
                            .route(
                                "/showings/{id}/",
                                web::get().to(handlers::showings::get_showing),
                            )
                            .route(
                                "/showings/{id}/",
                                web::put().to(handlers::showings::update_showing),
                            )
                            .route(
                                "/showings/{id}/",
                                web::delete().to(handlers::showings::delete_showing),
                            )
                            .route(
                                "/today-showings/",
                                web::get().to(handlers::showings::today_showings),
                            )
                            .route("/book/", web::post().to(handlers::bookings::book_showing))
                            .route(
                                "/user-bookings/",
                                web::get().to(handlers::bookings::user_bookings),
                            )
                            .route(
                                "/remove-test-showings/",
                                web::delete().to(handlers::showings::remove_test_showings),
                            ),
                    )
                    .service(
                        web::scope("/inventory")
                            .route("/snacks/", web::get().to(handlers::snacks::list_snacks))
                            .route("/snacks/", web::post().to(handlers::snacks::create_snack))
                            .route("/snacks/{id}/", web::get().to(handlers::snacks::get_snack))
                            .route(
                                "/snacks/{id}/",
                                web::put().to(handlers::snacks::update_snack),
                            )
                            .route(
                                "/snacks/{id}/",
                                web::delete().to(handlers::snacks::delete_snack),
                            ),
                    ),
            )
    })
    .bind(format!("{}:{}", config.host, config.port))?
    .run()
    .await
    .map_err(AppError::from)
}
