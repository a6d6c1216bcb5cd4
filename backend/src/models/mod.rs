pub mod booking;
pub mod movie;
pub mod showing;
pub mod snack;
pub mod theater;
pub mod user;

pub use booking::Booking;
pub use movie::Movie;
pub use showing::Showing;
pub use snack::SnackItem;
pub use theater::Theater;
pub use user::User;
