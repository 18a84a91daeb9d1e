//! Cases: named records that carry a claim set through the pipeline

mod name;
mod record;
mod session;
mod workbench;

pub use name::CaseName;
pub use record::{fields, general_field, CaseRecord, ClaimMap, DATE_FORMAT, GENERAL_FIELDS};
pub use session::{CaseSession, RowTag};
pub use workbench::Workbench;
