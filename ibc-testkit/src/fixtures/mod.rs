pub mod address;
pub mod packet;
