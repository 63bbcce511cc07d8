pub mod rent_increase;
pub mod transfer_tax;
