//! Domain entities and DTOs for the RFQ marketplace

pub mod responses;
pub mod rfqs;
pub mod users;

pub use responses::{
    Evaluation, ResponseSort, RfqResponse, ResponseStatus, SubmitResponseRequest,
};
pub use rfqs::{CreateRfqRequest, Requirement, Rfq, RfqStatus, UpdateRfqRequest};
pub use users::{User, UserType};
