pub mod auto_loan;
pub mod mortgage;
pub mod student_loan;
