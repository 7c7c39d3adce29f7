mod connectivity;
mod load;
mod network;
mod parse;

pub use connectivity::ConnectivityIndex;
pub use load::load_dataset;
pub use network::{Author, CollaborationNetwork};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorRecord {
    pub id: String,
    pub field: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Publication {
    pub id: String,
    pub authors: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub authors: Vec<AuthorRecord>,
    pub publications: Vec<Publication>,
}
