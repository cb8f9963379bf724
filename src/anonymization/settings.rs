//! Anonymization settings
//!
//! A flat value object: one toggle per category plus the token prefix each
//! category uses. Field names are short (`email`), the legacy `anonymize_*`
//! keys are accepted as aliases.

use crate::anonymization::models::DetectionCategory;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Category toggles and token prefixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Person names (entity tagging + regex fallback)
    #[serde(alias = "anonymize_names")]
    pub names: bool,

    /// Postal addresses
    #[serde(alias = "anonymize_addresses", alias = "anonymize_address")]
    pub addresses: bool,

    /// Phone numbers
    #[serde(alias = "anonymize_phone")]
    pub phone: bool,

    /// Email addresses
    #[serde(alias = "anonymize_email")]
    pub email: bool,

    /// National ID (NIR)
    #[serde(alias = "anonymize_nir")]
    pub national_id: bool,

    /// Master switch for both IP passes
    #[serde(alias = "anonymize_ip")]
    pub ip: bool,

    /// Public IPv4 pass
    #[serde(alias = "anonymize_ip_public")]
    pub ip_public: bool,

    /// Private and loopback IPv4 pass
    #[serde(alias = "anonymize_ip_private")]
    pub ip_private: bool,

    /// URLs
    #[serde(alias = "anonymize_urls")]
    pub urls: bool,

    /// Medical reference identifiers
    #[serde(alias = "anonymize_medical_references")]
    pub medical_references: bool,

    /// Credit card numbers
    #[serde(alias = "anonymize_credit_cards")]
    pub credit_cards: bool,

    /// IBANs
    #[serde(alias = "anonymize_iban")]
    pub iban: bool,

    /// Domestic bank account numbers
    #[serde(alias = "anonymize_bank_accounts")]
    pub bank_accounts: bool,

    /// ID card numbers
    #[serde(alias = "anonymize_id_cards")]
    pub id_cards: bool,

    /// Passport numbers
    #[serde(alias = "anonymize_passports")]
    pub passports: bool,

    /// Login declarations
    #[serde(alias = "anonymize_logins")]
    pub logins: bool,

    /// Employee IDs
    #[serde(alias = "anonymize_employee_ids")]
    pub employee_ids: bool,

    /// Legal case references
    #[serde(alias = "anonymize_legal_cases")]
    pub legal_cases: bool,

    /// Salary amounts
    #[serde(alias = "anonymize_salary_data")]
    pub salary_data: bool,

    /// Free-text medical statements; also turns on medical references
    #[serde(alias = "anonymize_medical_data")]
    pub medical_data: bool,

    /// Grades and scores
    #[serde(alias = "anonymize_grades")]
    pub grades: bool,

    /// GPS coordinates
    #[serde(alias = "anonymize_geolocations")]
    pub geolocations: bool,

    /// Biometric data mentions
    #[serde(alias = "anonymize_biometric")]
    pub biometric: bool,

    /// Number tokens per distinct value and return a mapping summary
    pub use_consistent_tokens: bool,

    /// Token prefix per category
    pub tokens: TokenPrefixes,
}

/// Replacement token prefix for each category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenPrefixes {
    #[serde(alias = "name_token")]
    pub name: String,
    #[serde(alias = "address_token")]
    pub address: String,
    #[serde(alias = "phone_token")]
    pub phone: String,
    #[serde(alias = "email_token")]
    pub email: String,
    #[serde(alias = "nir_token")]
    pub national_id: String,
    #[serde(alias = "ip_public_token")]
    pub ip_public: String,
    #[serde(alias = "ip_private_token")]
    pub ip_private: String,
    #[serde(alias = "url_token")]
    pub url: String,
    #[serde(alias = "medical_ref_token")]
    pub medical_reference: String,
    #[serde(alias = "credit_card_token")]
    pub credit_card: String,
    #[serde(alias = "iban_token")]
    pub iban: String,
    #[serde(alias = "bank_account_token")]
    pub bank_account: String,
    pub organization: String,
    #[serde(alias = "location_token")]
    pub location: String,
    pub identifier: String,
    #[serde(alias = "id_card_token")]
    pub id_card: String,
    #[serde(alias = "passport_token")]
    pub passport: String,
    #[serde(alias = "login_token")]
    pub login: String,
    #[serde(alias = "employee_id_token")]
    pub employee_id: String,
    #[serde(alias = "legal_case_token")]
    pub legal_case: String,
    #[serde(alias = "salary_token")]
    pub salary: String,
    #[serde(alias = "medical_token")]
    pub medical_data: String,
    #[serde(alias = "grades_token")]
    pub grades: String,
    #[serde(alias = "geolocation_token")]
    pub geolocation: String,
    #[serde(alias = "biometric_token")]
    pub biometric: String,
}

impl Default for TokenPrefixes {
    fn default() -> Self {
        Self {
            name: "[NAME]".into(),
            address: "[ADDRESS]".into(),
            phone: "[PHONE]".into(),
            email: "[EMAIL]".into(),
            national_id: "[NIR]".into(),
            ip_public: "[IP_PUBLIQUE]".into(),
            ip_private: "[IP_PRIVEE]".into(),
            url: "[URL]".into(),
            medical_reference: "[MEDREF]".into(),
            credit_card: "[CARTE]".into(),
            iban: "[IBAN]".into(),
            bank_account: "[COMPTE_BANCAIRE]".into(),
            organization: "[ORG]".into(),
            location: "[LOCATION]".into(),
            identifier: "[ID]".into(),
            id_card: "[CNI]".into(),
            passport: "[PASSEPORT]".into(),
            login: "[LOGIN]".into(),
            employee_id: "[MATRICULE]".into(),
            legal_case: "[DOSSIER_JURIDIQUE]".into(),
            salary: "[SALAIRE]".into(),
            medical_data: "[MEDICAL]".into(),
            grades: "[NOTE]".into(),
            geolocation: "[COORDONNEES]".into(),
            biometric: "[BIOMETRIE]".into(),
        }
    }
}

impl TokenPrefixes {
    /// Prefix configured for a category
    pub fn for_category(&self, category: DetectionCategory) -> &str {
        use DetectionCategory as C;
        match category {
            C::Name => &self.name,
            C::Address => &self.address,
            C::Phone => &self.phone,
            C::Email => &self.email,
            C::NationalId => &self.national_id,
            C::IpAddressPublic => &self.ip_public,
            C::IpAddressPrivate => &self.ip_private,
            C::Url => &self.url,
            C::MedicalReference => &self.medical_reference,
            C::CreditCard => &self.credit_card,
            C::Iban => &self.iban,
            C::BankAccount => &self.bank_account,
            C::Organization => &self.organization,
            C::Location => &self.location,
            C::Identifier => &self.identifier,
            C::IdCard => &self.id_card,
            C::Passport => &self.passport,
            C::Login => &self.login,
            C::EmployeeId => &self.employee_id,
            C::LegalCase => &self.legal_case,
            C::SalaryData => &self.salary,
            C::MedicalData => &self.medical_data,
            C::Grades => &self.grades,
            C::Geolocation => &self.geolocation,
            C::Biometric => &self.biometric,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            names: false,
            addresses: false,
            phone: true,
            email: true,
            national_id: true,
            ip: true,
            ip_public: true,
            ip_private: true,
            urls: true,
            medical_references: false,
            credit_cards: false,
            iban: false,
            bank_accounts: false,
            id_cards: false,
            passports: false,
            logins: false,
            employee_ids: false,
            legal_cases: false,
            salary_data: false,
            medical_data: false,
            grades: false,
            geolocations: false,
            biometric: false,
            use_consistent_tokens: true,
            tokens: TokenPrefixes::default(),
        }
    }
}

impl Settings {
    /// Every category disabled, consistent tokens on
    pub fn none() -> Self {
        Self {
            phone: false,
            email: false,
            national_id: false,
            ip: false,
            ip_public: false,
            ip_private: false,
            urls: false,
            ..Self::default()
        }
    }

    /// Every category enabled
    pub fn all() -> Self {
        Self {
            names: true,
            addresses: true,
            medical_references: true,
            credit_cards: true,
            iban: true,
            bank_accounts: true,
            id_cards: true,
            passports: true,
            logins: true,
            employee_ids: true,
            legal_cases: true,
            salary_data: true,
            medical_data: true,
            grades: true,
            geolocations: true,
            biometric: true,
            ..Self::default()
        }
    }

    /// Whether the private/loopback IP pass runs
    pub fn private_ip_enabled(&self) -> bool {
        self.ip || self.ip_private
    }

    /// Whether the public IP pass runs
    pub fn public_ip_enabled(&self) -> bool {
        self.ip || self.ip_public
    }

    /// Whether a category can be produced under these settings
    pub fn is_enabled(&self, category: DetectionCategory) -> bool {
        use DetectionCategory as C;
        match category {
            C::Name | C::Organization | C::Location | C::Identifier => self.names,
            C::Address => self.addresses,
            C::Phone => self.phone,
            C::Email => self.email,
            C::NationalId => self.national_id,
            C::IpAddressPublic => self.public_ip_enabled(),
            C::IpAddressPrivate => self.private_ip_enabled(),
            C::Url => self.urls,
            C::MedicalReference => self.medical_references || self.medical_data,
            C::CreditCard => self.credit_cards,
            C::Iban => self.iban,
            C::BankAccount => self.bank_accounts,
            C::IdCard => self.id_cards,
            C::Passport => self.passports,
            C::Login => self.logins,
            C::EmployeeId => self.employee_ids,
            C::LegalCase => self.legal_cases,
            C::SalaryData => self.salary_data,
            C::MedicalData => self.medical_data,
            C::Grades => self.grades,
            C::Geolocation => self.geolocations,
            C::Biometric => self.biometric,
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        for category in DetectionCategory::ALL {
            let prefix = self.tokens.for_category(category);
            if prefix.trim().is_empty() {
                bail!("Token prefix for {category} must not be empty");
            }
            if prefix.contains(['\n', '\r', '\t']) {
                bail!("Token prefix for {category} must not contain line breaks or tabs");
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides (`WHISPER_ANONYMIZE_<FIELD>`)
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let toggles: [(&str, &mut bool); 24] = [
            ("NAMES", &mut self.names),
            ("ADDRESSES", &mut self.addresses),
            ("PHONE", &mut self.phone),
            ("EMAIL", &mut self.email),
            ("NATIONAL_ID", &mut self.national_id),
            ("IP", &mut self.ip),
            ("IP_PUBLIC", &mut self.ip_public),
            ("IP_PRIVATE", &mut self.ip_private),
            ("URLS", &mut self.urls),
            ("MEDICAL_REFERENCES", &mut self.medical_references),
            ("CREDIT_CARDS", &mut self.credit_cards),
            ("IBAN", &mut self.iban),
            ("BANK_ACCOUNTS", &mut self.bank_accounts),
            ("ID_CARDS", &mut self.id_cards),
            ("PASSPORTS", &mut self.passports),
            ("LOGINS", &mut self.logins),
            ("EMPLOYEE_IDS", &mut self.employee_ids),
            ("LEGAL_CASES", &mut self.legal_cases),
            ("SALARY_DATA", &mut self.salary_data),
            ("MEDICAL_DATA", &mut self.medical_data),
            ("GRADES", &mut self.grades),
            ("GEOLOCATIONS", &mut self.geolocations),
            ("BIOMETRIC", &mut self.biometric),
            ("CONSISTENT_TOKENS", &mut self.use_consistent_tokens),
        ];

        for (suffix, slot) in toggles {
            let var = format!("WHISPER_ANONYMIZE_{suffix}");
            if let Ok(val) = std::env::var(&var) {
                *slot = val
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {var} value: {val}"))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.email);
        assert!(settings.phone);
        assert!(settings.ip);
        assert!(!settings.names);
        assert!(!settings.addresses);
        assert!(settings.use_consistent_tokens);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_none_disables_everything() {
        let settings = Settings::none();
        for category in DetectionCategory::ALL {
            assert!(!settings.is_enabled(category), "{category} enabled");
        }
    }

    #[test]
    fn test_all_enables_everything() {
        let settings = Settings::all();
        for category in DetectionCategory::ALL {
            assert!(settings.is_enabled(category), "{category} disabled");
        }
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let settings: Settings = serde_json::from_str(
            r#"{"anonymize_email": false, "anonymize_address": true,
                "tokens": {"email_token": "<MAIL>"}}"#,
        )
        .unwrap();
        assert!(!settings.email);
        assert!(settings.addresses);
        assert!(settings.phone);
        assert_eq!(settings.tokens.email, "<MAIL>");
    }

    #[test]
    fn test_toml_partial_settings() {
        let settings: Settings = toml::from_str(
            r#"
names = true
use_consistent_tokens = false

[tokens]
email = "<EMAIL>"
"#,
        )
        .unwrap();
        assert!(settings.names);
        assert!(settings.phone);
        assert!(!settings.use_consistent_tokens);
        assert_eq!(settings.tokens.email, "<EMAIL>");
        assert_eq!(settings.tokens.phone, "[PHONE]");
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut settings = Settings::default();
        settings.tokens.phone = "  ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_legacy_medical_data_enables_references() {
        let settings: Settings = toml::from_str(
            r#"
anonymize_medical_data = true
anonymize_salary_data = true
anonymize_geolocations = true
"#,
        )
        .unwrap();
        assert!(settings.medical_data);
        assert!(!settings.medical_references);
        assert!(settings.is_enabled(DetectionCategory::MedicalReference));
        assert!(settings.is_enabled(DetectionCategory::MedicalData));
        assert!(settings.is_enabled(DetectionCategory::SalaryData));
        assert!(settings.is_enabled(DetectionCategory::Geolocation));
        assert!(!settings.is_enabled(DetectionCategory::Grades));
        assert_eq!(settings.tokens.geolocation, "[COORDONNEES]");
    }

    #[test]
    fn test_ip_master_switch() {
        let mut settings = Settings::none();
        settings.ip = true;
        assert!(settings.private_ip_enabled());
        assert!(settings.public_ip_enabled());

        let mut settings = Settings::none();
        settings.ip_private = true;
        assert!(settings.private_ip_enabled());
        assert!(!settings.public_ip_enabled());
    }
}
