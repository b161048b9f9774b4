pub mod admin_dashboard;
pub mod booking;
pub mod booking_confirmation;
pub mod not_found;
