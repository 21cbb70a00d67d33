pub mod broadcast_record;
pub mod coordinates;
pub mod display_name;
pub mod identity;
