pub mod payroll;
pub mod tax_return;
