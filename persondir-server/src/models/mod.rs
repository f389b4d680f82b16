//! Domain models shared by the database and HTTP layers
//!
//! Request bodies are checked for presence by deserialization alone:
//! every field of a profile except `street2` must be supplied.

pub mod person;
pub mod validation;

pub use person::{CreatedPerson, PersonId, PersonProfile};
pub use validation::ValidationError;
