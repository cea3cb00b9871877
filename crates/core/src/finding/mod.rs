mod attachment;
mod error;
mod ids;
mod requests;
mod types;

pub use attachment::{
    attachment_url, file_extension, generate_stored_name, stored_attachment_name,
    MAX_ATTACHMENT_BYTES, STORED_NAME_PREFIX, UPLOADS_URL_PREFIX,
};
pub use error::ValidationError;
pub use ids::{generate_finding_id, random_token, FINDING_ID_LEN, ID_ALPHABET};
pub use requests::{CreateFindingRequest, NewFinding, REQUIRED_FIELDS};
pub use types::{CreatedFinding, Finding, FindingSummary, StoredAttachment};
