pub mod bookings;
pub mod health;
pub mod movies;
pub mod showings;
pub mod snacks;
pub mod theaters;
pub mod users;
