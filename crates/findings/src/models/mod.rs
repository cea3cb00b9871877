mod finding;

pub use finding::CreateFindingForm;
