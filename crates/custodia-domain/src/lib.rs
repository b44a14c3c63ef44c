pub mod digest;
pub mod record;
pub mod taxid;
pub mod validation;

pub use digest::{Digest32, ParseHexError};
pub use record::{
    AcquiredFile, CustodianRecord, DutyFunction, InputRecord, OwnerIdentifier, OwnerKind,
    OwnerRecord, Rank, Region,
};
pub use taxid::{validate_individual_id, validate_organization_id};
pub use validation::{validate_record, ValidationError};
