//! HR domain module: departments, job titles, employment history and monthly
//! work records.

pub mod department;
pub mod history;
pub mod job_title;
pub mod work_record;

pub use department::{Department, NewDepartment};
pub use history::{EmploymentHistory, NewEmploymentHistory};
pub use job_title::{JobTitle, NewJobTitle};
pub use work_record::{MonthlyWorkRecord, NewMonthlyWorkRecord, WorkFigures};
