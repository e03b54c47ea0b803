pub mod app_user;
pub mod expense;
pub mod itinerary_item;
pub mod media_item;
pub mod membership;
pub mod message;
pub mod trip;
