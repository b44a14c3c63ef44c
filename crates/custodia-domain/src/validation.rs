use core::fmt;

use crate::record::{InputRecord, OwnerIdentifier};
use crate::taxid::{validate_individual_id, validate_organization_id};

/// Rejection reasons for an input record. A run never starts while any of
/// these hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingCustodianName,
    InvalidCustodianId,
    MissingOrderNumber,
    InvalidOwnerIndividualId,
    InvalidOwnerOrganizationId,
    NoFilesSelected,
}

impl ValidationError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCustodianName => "MISSING_CUSTODIAN_NAME",
            Self::InvalidCustodianId => "INVALID_CUSTODIAN_ID",
            Self::MissingOrderNumber => "MISSING_ORDER_NUMBER",
            Self::InvalidOwnerIndividualId => "INVALID_OWNER_INDIVIDUAL_ID",
            Self::InvalidOwnerOrganizationId => "INVALID_OWNER_ORGANIZATION_ID",
            Self::NoFilesSelected => "NO_FILES_SELECTED",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingCustodianName => "custodian name is required",
            Self::InvalidCustodianId => "custodian individual id failed check-digit validation",
            Self::MissingOrderNumber => "order number is required",
            Self::InvalidOwnerIndividualId => {
                "owner individual id failed check-digit validation"
            }
            Self::InvalidOwnerOrganizationId => {
                "owner organization id failed check-digit validation"
            }
            Self::NoFilesSelected => "at least one file must be selected",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks every invariant the pipeline relies on. Field checks run in a
/// fixed order so rejection output is deterministic.
pub fn validate_record(record: &InputRecord) -> Result<(), ValidationError> {
    if record.custodian.name.trim().is_empty() {
        return Err(ValidationError::MissingCustodianName);
    }
    if !validate_individual_id(&record.custodian.id) {
        return Err(ValidationError::InvalidCustodianId);
    }
    if record.custodian.order_number.trim().is_empty() {
        return Err(ValidationError::MissingOrderNumber);
    }

    match &record.owner.identifier {
        OwnerIdentifier::Individual { id: Some(id) } => {
            if !validate_individual_id(id) {
                return Err(ValidationError::InvalidOwnerIndividualId);
            }
        }
        OwnerIdentifier::Organization { id: Some(id) } => {
            if !validate_organization_id(id) {
                return Err(ValidationError::InvalidOwnerOrganizationId);
            }
        }
        // An absent identifier for a known kind, or an unknown owner,
        // waives check-digit validation.
        OwnerIdentifier::Individual { id: None }
        | OwnerIdentifier::Organization { id: None }
        | OwnerIdentifier::Unknown => {}
    }

    if record.files.is_empty() {
        return Err(ValidationError::NoFilesSelected);
    }

    Ok(())
}
