pub mod recent_roast;
pub mod roast;
pub mod user;

pub use recent_roast::Entity as RecentRoast;
pub use roast::Entity as Roast;
pub use user::Entity as User;
