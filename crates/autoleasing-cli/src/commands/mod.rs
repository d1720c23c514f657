pub mod enquiry;
pub mod inventory;
pub mod lease;
pub mod wishlist;
