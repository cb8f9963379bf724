//! Detection categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed enumeration of the kinds of sensitive data the engine detects.
///
/// Used as a map key in the mapping summary and as the default stem of
/// replacement tokens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionCategory {
    /// Person names
    Name,
    /// Postal addresses, street fragments, bare postal codes
    Address,
    /// Telephone numbers
    Phone,
    /// Email addresses
    Email,
    /// National identification number (French NIR)
    NationalId,
    /// Public IPv4 addresses
    IpAddressPublic,
    /// Private (RFC 1918) and loopback IPv4 addresses
    IpAddressPrivate,
    /// Payment card numbers
    CreditCard,
    /// International bank account numbers
    Iban,
    /// Domestic bank account numbers (RIB)
    BankAccount,
    /// Medical reference identifiers (dossier, ref, ...)
    MedicalReference,
    /// Web URLs
    Url,
    /// Organizations reported by the entity tagger
    Organization,
    /// Locations reported by the entity tagger
    Location,
    /// Miscellaneous identifiers reported by the entity tagger
    Identifier,
    /// National identity card numbers
    IdCard,
    /// Passport numbers
    Passport,
    /// Login / username declarations
    Login,
    /// Employee registration numbers
    EmployeeId,
    /// Legal case references
    LegalCase,
    /// Salary amounts
    SalaryData,
    /// Free-text medical statements (diagnosis, treatment, ...)
    MedicalData,
    /// Grades and scores
    Grades,
    /// GPS coordinates
    Geolocation,
    /// Biometric data mentions
    Biometric,
}

impl DetectionCategory {
    /// Every category, in declaration order
    pub const ALL: [DetectionCategory; 25] = [
        Self::Name,
        Self::Address,
        Self::Phone,
        Self::Email,
        Self::NationalId,
        Self::IpAddressPublic,
        Self::IpAddressPrivate,
        Self::CreditCard,
        Self::Iban,
        Self::BankAccount,
        Self::MedicalReference,
        Self::Url,
        Self::Organization,
        Self::Location,
        Self::Identifier,
        Self::IdCard,
        Self::Passport,
        Self::Login,
        Self::EmployeeId,
        Self::LegalCase,
        Self::SalaryData,
        Self::MedicalData,
        Self::Grades,
        Self::Geolocation,
        Self::Biometric,
    ];

    /// Stable upper-case label, used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Address => "ADDRESS",
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
            Self::NationalId => "NATIONAL_ID",
            Self::IpAddressPublic => "IP_PUBLIC",
            Self::IpAddressPrivate => "IP_PRIVATE",
            Self::CreditCard => "CREDIT_CARD",
            Self::Iban => "IBAN",
            Self::BankAccount => "BANK_ACCOUNT",
            Self::MedicalReference => "MEDICAL_REFERENCE",
            Self::Url => "URL",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::Identifier => "IDENTIFIER",
            Self::IdCard => "ID_CARD",
            Self::Passport => "PASSPORT",
            Self::Login => "LOGIN",
            Self::EmployeeId => "EMPLOYEE_ID",
            Self::LegalCase => "LEGAL_CASE",
            Self::SalaryData => "SALARY",
            Self::MedicalData => "MEDICAL_DATA",
            Self::Grades => "GRADES",
            Self::Geolocation => "GEOLOCATION",
            Self::Biometric => "BIOMETRIC",
        }
    }

    /// Categories produced by the name phase (entity tagging + regex names)
    pub fn is_entity(&self) -> bool {
        matches!(
            self,
            Self::Name | Self::Organization | Self::Location | Self::Identifier
        )
    }
}

impl fmt::Display for DetectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
