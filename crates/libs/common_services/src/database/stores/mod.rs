pub mod expense_store;
pub mod itinerary_store;
pub mod media_store;
pub mod membership_store;
pub mod message_store;
pub mod trip_store;
pub mod user_store;
