pub mod health;
pub mod root;
pub mod verify_email;

pub use self::health::health;
pub use self::root::root;
