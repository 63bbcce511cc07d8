pub mod sales_tax;
