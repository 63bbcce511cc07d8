pub mod vacation_pay;
