//! Document fixture catalog
//!
//! Parameterized inputs for the intake endpoint: one row per document
//! combination of file type, builder and entity.

use serde::Serialize;
use std::collections::BTreeSet;

/// A single catalog row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub file_url: &'static str,
    pub file_type: &'static str,
    pub file_id: &'static str,
    pub builder_id: &'static str,
    pub entity_id: &'static str,
    pub description: &'static str,
}

/// All document fixtures, in parametrization order
pub const TEST_CASES: &[TestCase] = &[
    TestCase {
        file_url: "https://dc-eastus-dev-fs-func-001.azurewebsites.net/api/files/mybldr/projects/6576/files/875c043f-8312-4ead-838a-82181b9e1a5a",
        file_type: "community",
        file_id: "abcd1234",
        builder_id: "example",
        entity_id: "abcd1234",
        description: "Community guide PDF for Builder Alpha",
    },
    TestCase {
        file_url: "https://example.com/zoning-map.pdf",
        file_type: "zoning",
        file_id: "abcd1234",
        builder_id: "example",
        entity_id: "abcd1234",
        description: "Zoning map PDF for Builder Beta",
    },
    TestCase {
        file_url: "https://example.com/floorplan.png",
        file_type: "image",
        file_id: "abcd1234",
        builder_id: "example",
        entity_id: "abcd1234",
        description: "Floor plan image for Builder Gamma",
    },
    TestCase {
        file_url: "https://example.com/blueprint.docx",
        file_type: "blueprint",
        file_id: "abcd1234",
        builder_id: "example",
        entity_id: "abcd1234",
        description: "Blueprint document for Builder Delta",
    },
    TestCase {
        file_url: "https://example.com/brochure.pdf",
        file_type: "brochure",
        file_id: "abcd1234",
        builder_id: "example",
        entity_id: "abcd1234",
        description: "Marketing brochure for Builder Epsilon",
    },
];

/// Lookup over a set of catalog rows
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    cases: &'static [TestCase],
}

impl Catalog {
    /// Catalog over the built-in fixtures
    pub fn builtin() -> Self {
        Self { cases: TEST_CASES }
    }

    /// Find a row by file id. The first matching row wins.
    pub fn get(&self, file_id: &str) -> Option<&'static TestCase> {
        self.cases.iter().find(|case| case.file_id == file_id)
    }

    pub fn all(&self) -> &'static [TestCase] {
        self.cases
    }

    /// First row, used for configuration defaults
    pub fn first(&self) -> Option<&'static TestCase> {
        self.cases.first()
    }

    /// File ids that appear on more than one row.
    ///
    /// Lookups by these ids only ever reach the first row.
    pub fn duplicate_ids(&self) -> Vec<&'static str> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for case in self.cases {
            if !seen.insert(case.file_id) {
                duplicates.insert(case.file_id);
            }
        }
        duplicates.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &[TestCase] = &[
        TestCase {
            file_url: "https://example.com/a.pdf",
            file_type: "community",
            file_id: "a",
            builder_id: "b1",
            entity_id: "e1",
            description: "first a",
        },
        TestCase {
            file_url: "https://example.com/b.pdf",
            file_type: "zoning",
            file_id: "b",
            builder_id: "b2",
            entity_id: "e2",
            description: "only b",
        },
        TestCase {
            file_url: "https://example.com/a2.pdf",
            file_type: "image",
            file_id: "a",
            builder_id: "b3",
            entity_id: "e3",
            description: "second a",
        },
    ];

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.first().map(|c| c.file_type), Some("community"));
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let catalog = Catalog { cases: MIXED };
        let found = catalog.get("a").unwrap();
        assert_eq!(found.description, "first a");
        assert_eq!(catalog.get("b").unwrap().file_type, "zoning");
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn test_duplicate_ids() {
        assert_eq!(Catalog { cases: MIXED }.duplicate_ids(), vec!["a"]);
        assert_eq!(Catalog::builtin().duplicate_ids(), vec!["abcd1234"]);
        assert!(Catalog { cases: &MIXED[..2] }.duplicate_ids().is_empty());
    }
}
