//! Pre-built Test Fixtures
//!
//! Ready-to-use users, documents and amounts. Fixed fixtures are
//! predictable; the `random_*` helpers use `fake` for variety.

use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, UserId};
use domain_claims::document::MAX_DOCUMENT_BYTES;
use domain_claims::{ApplicationUser, Role, UploadedDocument};

/// Fixture for users in each role
pub struct UserFixtures;

impl UserFixtures {
    /// Lecturer "user123", John Doe
    pub fn lecturer() -> ApplicationUser {
        Self::user("user123", "John", "Doe", Role::Lecturer)
    }

    /// A second lecturer, for ownership checks
    pub fn other_lecturer() -> ApplicationUser {
        Self::user("user456", "Jane", "Smith", Role::Lecturer)
    }

    pub fn coordinator() -> ApplicationUser {
        Self::user("coordinator123", "Carol", "Nkosi", Role::Coordinator)
    }

    pub fn manager() -> ApplicationUser {
        Self::user("manager123", "Mandla", "Dube", Role::Manager)
    }

    /// All fixed users
    pub fn all() -> Vec<ApplicationUser> {
        vec![
            Self::lecturer(),
            Self::other_lecturer(),
            Self::coordinator(),
            Self::manager(),
        ]
    }

    /// A user with a generated name
    pub fn random(id: &str, role: Role) -> ApplicationUser {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        Self::user(id, &first, &last, role)
    }

    fn user(id: &str, first: &str, last: &str, role: Role) -> ApplicationUser {
        ApplicationUser {
            id: UserId::from(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            role,
        }
    }
}

/// Fixture for supporting documents
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A 1 KB PDF
    pub fn pdf() -> UploadedDocument {
        Self::sized("timesheet.pdf", "application/pdf", 1024)
    }

    /// A PNG scan
    pub fn png() -> UploadedDocument {
        Self::sized("scan.png", "image/png", 2048)
    }

    /// Exactly at the size limit
    pub fn pdf_at_limit() -> UploadedDocument {
        Self::sized("large.pdf", "application/pdf", MAX_DOCUMENT_BYTES as usize)
    }

    /// 6 MB, over the size limit
    pub fn oversized_pdf() -> UploadedDocument {
        Self::sized("huge.pdf", "application/pdf", 6 * 1024 * 1024)
    }

    /// An executable, never allowed
    pub fn executable() -> UploadedDocument {
        Self::sized("test.exe", "application/exe", 1024)
    }

    /// A document of `length` filler bytes
    pub fn sized(file_name: &str, content_type: &str, length: usize) -> UploadedDocument {
        UploadedDocument::new(file_name, content_type, vec![b'%'; length])
    }
}

/// Fixture for amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// R 500.00 per hour
    pub fn zar_rate() -> Money {
        Money::new(dec!(500), Currency::ZAR)
    }

    pub fn rate(amount: Decimal) -> Money {
        Money::new(amount, Currency::ZAR)
    }

    /// Ten hours
    pub fn hours() -> Decimal {
        dec!(10)
    }
}
