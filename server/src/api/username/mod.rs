pub mod check_availability;
pub mod list;
