//! The fixed set of API endpoints.

use std::fmt;

/// One logical endpoint of the petition API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Petition status lookup table.
    Status,
    /// Petition level lookup table.
    Level,
    Archive,
    Complete,
    Advisement,
    Poll,
    /// Full record of a single petition.
    Petition(u64),
}

impl Endpoint {
    /// Path relative to the API root.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Status => "attributes/status.json".to_string(),
            Endpoint::Level => "attributes/level.json".to_string(),
            Endpoint::Archive => "petitions/archive.json".to_string(),
            Endpoint::Complete => "petitions/complete.json".to_string(),
            Endpoint::Advisement => "petitions/advisement.json".to_string(),
            Endpoint::Poll => "petitions/poll.json".to_string(),
            Endpoint::Petition(id) => format!("petition/{id}.json"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_paths() {
        assert_eq!(Endpoint::Status.path(), "attributes/status.json");
        assert_eq!(Endpoint::Level.path(), "attributes/level.json");
    }

    #[test]
    fn list_paths() {
        assert_eq!(Endpoint::Archive.path(), "petitions/archive.json");
        assert_eq!(Endpoint::Complete.path(), "petitions/complete.json");
        assert_eq!(Endpoint::Advisement.path(), "petitions/advisement.json");
        assert_eq!(Endpoint::Poll.path(), "petitions/poll.json");
    }

    #[test]
    fn petition_path_interpolates_id() {
        assert_eq!(Endpoint::Petition(759).path(), "petition/759.json");
        assert_eq!(Endpoint::Petition(759).to_string(), "petition/759.json");
    }
}
