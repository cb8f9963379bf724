//! Pattern library for structured detection
//!
//! Every pattern is compiled once when the library is built. Patterns never
//! match across line breaks except the address family, whose matches are
//! clipped by the address detector.

use anyhow::{Context, Result};
use regex::Regex;

const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

const EMAIL: &str = r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b";

/// Phone numbers: international, French national, North American and
/// generic grouped digits. The lookarounds reject clock times, ISO dates,
/// card-shaped digit runs and fragments of longer numbers.
const PHONE: &str = concat!(
    r"(?<!\d)",
    r"(?!\d{1,2}:\d{2})",
    r"(?!\d{4}[\-/]\d{2}[\-/]\d{2})",
    r"(?!(?:\d{4}[ \-]?){3}\d{4}(?!\d))",
    r"(?:",
    r"(?:\+|00)\d{1,3}[ .\-]*(?:\(\d{1,4}\)[ .\-]*)?(?:\(0\)[ .\-]*)?\d{1,4}(?:[ .\-]\d{2,8}){1,4}",
    r"|0[1-9](?:[ .\-]?\d{2}){4}",
    r"|(?:\(\d{3}\)|\d{3})[ .\-]?\d{3}[ .\-]\d{4}",
    r"|\d{2,4}[ \-]\d{2,4}[ \-]\d{2,4}(?:[ \-]\d{2,4})*",
    r")",
    r"(?!\d|[.:]\d)",
);

const URL: &str = r"https?://(?:[A-Za-z0-9$\-_@.&+!*(),/:;=?#~]|%[0-9A-Fa-f]{2})+";

const NATIONAL_ID: &str =
    r"\b[12](?:[ .\-]?\d{2}){2}(?:[ .\-]?\d{2,3})(?:[ .\-]?\d{3}){2}(?:[ .\-]?\d{2})?\b";

const MEDICAL_REFERENCE: &str = concat!(
    r"(?i)\b(?:r[ée]f(?:[ée]rence)?|dossier[ \t]*(?:num(?:[ée]ro)?|n[o°]?)\.?|d-?num)",
    r"[ \t:#.\-]*([^\s,;:()]+)",
);

const STREET_TYPES: &str =
    r"(?:rue|avenue|boulevard|place|impasse|allée|chemin|cours|quai|passage)";

const ADDRESS_WORDS: &str = r"[A-Za-zÀ-ÿ\s'\-]+";

const PERSON_LOWER: &str = r"[a-zàâäéèêëïîôùûüÿ]";

const CREDIT_CARD: &str = r"\b(?:\d{4}[ \-]?){3}\d{4}\b";
const IBAN: &str = r"\b[A-Z]{2}\d{2}[A-Z0-9]{4}\d{7}[A-Z0-9]{1,16}\b";
const BANK_ACCOUNT: &str = r"\b\d{5} *\d{5} *[0-9A-Z]{11} *\d{2}\b";
const ID_CARD: &str = r"\b\d{12}\b";
const PASSPORT: &str = r"\b\d{2}[A-Z]{2}\d{5}\b";
const LOGIN: &str = r"\b(?i:login|username|user|identifiant)[ \t:=]+([a-zA-Z0-9._\-]+)\b";
const EMPLOYEE_ID: &str = r"\b(?i:matricule|employee|emp)[ \t:]*([A-Z0-9]{3,10})\b";
const LEGAL_CASE: &str =
    r"\b(?i:dossier|affaire|proc[ée]dure|plainte)[ :]?([A-Z0-9/\-]{5,15})\b";

/// Amount with a euro marker, French thousands grouping allowed, optional
/// pay qualifier
const SALARY: &str = concat!(
    r"\b(?:\d{1,3}(?:[ \x{a0}\x{202f}]\d{3})+|\d{3,6})[ \x{a0}\x{202f}]?",
    r"(?:€|(?i:euros?|eur)\b)",
    r"(?:[ \x{a0}\x{202f}]+(?i:brut|net|par mois|mensuel)\b)?",
);

/// Keyword, then up to 50 characters of the statement on the same line
const MEDICAL_DATA: &str = concat!(
    r"\b(?i:diagnostic|pathologie|traitement|médicament|ordonnance|consultation)",
    r"[ :]+([^\s][^\n\r\t]{0,49})\b",
);

const GRADES: &str = concat!(
    r"\b(?i:note|résultat|moyenne|score)[ :]*",
    r"(\d{1,2}(?:[.,]\d{1,2}/\d{1,3}|/\d{1,3}|[.,]\d{1,2}))\b",
);

/// Decimal latitude and longitude, optional degree sign and hemisphere
const GEOLOCATION: &str = concat!(
    r"[-+]?\b\d{1,3}\.\d{2,}°?(?: ?[NS])?",
    r"(?:, ?| )",
    r"[-+]?\b\d{1,3}\.\d{2,}°?(?: ?[EW]\b)?",
);

const BIOMETRIC: &str = concat!(
    r"\b(?i:empreinte|biométrie|reconnaissance|scan|capteur)",
    r"[ :]+([^\s][^\n\r\t]{0,29})\b",
);

/// Compiled patterns, one per data shape
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    pub email: Regex,
    pub phone: fancy_regex::Regex,
    pub ipv4: Regex,
    pub ip_private: Regex,
    pub ip_loopback: Regex,
    pub url: Regex,
    pub national_id: Regex,
    pub medical_reference: Regex,
    pub complete_address: Regex,
    pub precise_address: Regex,
    pub postal_code: Regex,
    pub street: Regex,
    pub person_name: Regex,
    pub single_person_name: Regex,
    pub credit_card: Regex,
    pub iban: Regex,
    pub bank_account: Regex,
    pub id_card: Regex,
    pub passport: Regex,
    pub login: Regex,
    pub employee_id: Regex,
    pub legal_case: Regex,
    pub salary: Regex,
    pub medical_data: Regex,
    pub grades: Regex,
    pub geolocation: Regex,
    pub biometric: Regex,
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid regex in pattern '{name}': {pattern}"))
}

/// The three two-word name shapes: `Firstname LASTNAME`, `LASTNAME Firstname`,
/// `Firstname Lastname`.
fn person_name_shapes() -> String {
    let low = PERSON_LOWER;
    format!(
        "[A-Z]{low}{{2,}} +[A-Z][A-Z\\-]{{2,}}\
         |[A-Z][A-Z\\-]{{2,}} +[A-Z]{low}{{2,}}\
         |[A-Z]{low}{{2,}} +[A-Z]{low}{{2,}}"
    )
}

impl PatternLibrary {
    /// Compile the built-in patterns
    pub fn new() -> Result<Self> {
        let ipv4 = format!(r"\b(?:{OCTET}\.){{3}}{OCTET}\b");
        let ip_private = format!(
            r"\b(?:10\.(?:{OCTET}\.){{2}}{OCTET}|172\.(?:1[6-9]|2[0-9]|3[01])\.{OCTET}\.{OCTET}|192\.168\.{OCTET}\.{OCTET})\b"
        );
        let ip_loopback = format!(r"\b127\.(?:{OCTET}\.){{2}}{OCTET}\b");

        let complete_address = format!(
            r"(?i)\b\d{{1,4}}\s+(?:bis|ter)?\s*{STREET_TYPES}\s+{ADDRESS_WORDS}\s+\d{{5}}\s+{ADDRESS_WORDS}\b"
        );
        let precise_address = format!(
            r"(?i)\b\d{{1,4}}\s+(?:{STREET_TYPES}|bis|ter)\s+{ADDRESS_WORDS},?\s*\d{{5}}\s+{ADDRESS_WORDS}\b"
        );
        let street = format!(r"(?i)\b\d{{1,4}}\s+{STREET_TYPES}\s+{ADDRESS_WORDS}");

        let shapes = person_name_shapes();
        let person_name = format!(r"\b(?:{shapes})\b");
        let single_person_name = format!(
            r"^(?:{shapes}|[A-Z][a-zàâäéèêëïîôùûüÿA-Z\-]{{2,}})$"
        );

        let phone = fancy_regex::Regex::new(PHONE)
            .with_context(|| format!("Invalid regex in pattern 'phone': {PHONE}"))?;

        Ok(Self {
            email: compile("email", EMAIL)?,
            phone,
            ipv4: compile("ipv4", &ipv4)?,
            ip_private: compile("ip_private", &ip_private)?,
            ip_loopback: compile("ip_loopback", &ip_loopback)?,
            url: compile("url", URL)?,
            national_id: compile("national_id", NATIONAL_ID)?,
            medical_reference: compile("medical_reference", MEDICAL_REFERENCE)?,
            complete_address: compile("complete_address", &complete_address)?,
            precise_address: compile("precise_address", &precise_address)?,
            postal_code: compile("postal_code", r"\b\d{5}\b")?,
            street: compile("street", &street)?,
            person_name: compile("person_name", &person_name)?,
            single_person_name: compile("single_person_name", &single_person_name)?,
            credit_card: compile("credit_card", CREDIT_CARD)?,
            iban: compile("iban", IBAN)?,
            bank_account: compile("bank_account", BANK_ACCOUNT)?,
            id_card: compile("id_card", ID_CARD)?,
            passport: compile("passport", PASSPORT)?,
            login: compile("login", LOGIN)?,
            employee_id: compile("employee_id", EMPLOYEE_ID)?,
            legal_case: compile("legal_case", LEGAL_CASE)?,
            salary: compile("salary", SALARY)?,
            medical_data: compile("medical_data", MEDICAL_DATA)?,
            grades: compile("grades", GRADES)?,
            geolocation: compile("geolocation", GEOLOCATION)?,
            biometric: compile("biometric", BIOMETRIC)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_matches(library: &PatternLibrary, text: &str) -> Vec<String> {
        library
            .phone
            .find_iter(text)
            .map(|m| m.unwrap().as_str().to_string())
            .collect()
    }

    #[test]
    fn test_library_compiles() {
        assert!(PatternLibrary::new().is_ok());
    }

    #[test]
    fn test_email_pattern() {
        let library = PatternLibrary::new().unwrap();
        assert!(library.email.is_match("test@example.com"));
        assert!(!library.email.is_match("not-an-email"));
    }

    #[test]
    fn test_phone_rejects_times_and_dates() {
        let library = PatternLibrary::new().unwrap();
        assert!(phone_matches(&library, "rendez-vous à 09:12").is_empty());
        assert!(phone_matches(&library, "le 2026-01-10").is_empty());
        assert_eq!(
            phone_matches(&library, "Appelez le 01.23.45.67.89 à 09:12"),
            vec!["01.23.45.67.89"]
        );
    }

    #[test]
    fn test_phone_does_not_claim_card_numbers_whole() {
        let library = PatternLibrary::new().unwrap();
        let found = phone_matches(&library, "carte 4111 1111 1111 1111");
        assert!(found.iter().all(|m| m != "4111 1111 1111 1111"));
    }

    #[test]
    fn test_private_ip_pattern() {
        let library = PatternLibrary::new().unwrap();
        assert!(library.ip_private.is_match("10.0.0.1"));
        assert!(library.ip_private.is_match("172.20.1.1"));
        assert!(library.ip_private.is_match("192.168.1.200"));
        assert!(!library.ip_private.is_match("172.32.0.1"));
        assert!(!library.ip_private.is_match("8.8.8.8"));
        assert!(library.ip_loopback.is_match("127.0.0.1"));
    }

    #[test]
    fn test_ipv4_octet_range() {
        let library = PatternLibrary::new().unwrap();
        assert!(library.ipv4.is_match("255.255.255.255"));
        let found: Vec<_> = library
            .ipv4
            .find_iter("999.1.1.1")
            .map(|m| m.as_str().to_string())
            .collect();
        assert!(!found.contains(&"999.1.1.1".to_string()));
    }

    #[test]
    fn test_national_id_pattern() {
        let library = PatternLibrary::new().unwrap();
        assert!(library.national_id.is_match("1 85 05 78 006 084 36"));
        assert!(library.national_id.is_match("285057800608436"));
        assert!(!library.national_id.is_match("385057800608436"));
    }

    #[test]
    fn test_medical_reference_captures_identifier() {
        let library = PatternLibrary::new().unwrap();
        let caps = library.medical_reference.captures("voir ref #MED-4432").unwrap();
        assert_eq!(&caps[1], "MED-4432");
        let caps = library
            .medical_reference
            .captures("Dossier n° 2024-118")
            .unwrap();
        assert_eq!(&caps[1], "2024-118");
    }

    #[test]
    fn test_person_name_shapes() {
        let library = PatternLibrary::new().unwrap();
        assert!(library.person_name.is_match("Marie Dupont"));
        assert!(library.person_name.is_match("JOLY Sylvain"));
        assert!(library.person_name.is_match("Sylvain JOLY"));
        assert!(!library.person_name.is_match("marie dupont"));
        assert!(library.single_person_name.is_match("Dupont"));
        assert!(!library.single_person_name.is_match("Marie Dupont est"));
    }

    fn found(regex: &Regex, text: &str) -> Vec<String> {
        regex.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }

    #[test]
    fn test_salary_pattern() {
        let library = PatternLibrary::new().unwrap();
        assert_eq!(
            found(&library.salary, "Salaire : 2 800 € brut, prime 450 euros."),
            vec!["2 800 € brut", "450 euros"]
        );
        assert_eq!(found(&library.salary, "payé 3200EUR net"), vec!["3200EUR net"]);
        assert!(found(&library.salary, "ticket 12 €, réf 2024").is_empty());
    }

    #[test]
    fn test_grades_pattern() {
        let library = PatternLibrary::new().unwrap();
        let caps = library.grades.captures("Moyenne : 14,5/20 au semestre").unwrap();
        assert_eq!(&caps[1], "14,5/20");
        let caps = library.grades.captures("note 15/20").unwrap();
        assert_eq!(&caps[1], "15/20");
        assert!(!library.grades.is_match("note importante"));
    }

    #[test]
    fn test_geolocation_pattern() {
        let library = PatternLibrary::new().unwrap();
        assert_eq!(
            found(&library.geolocation, "Position 48.8566, 2.3522 relevée"),
            vec!["48.8566, 2.3522"]
        );
        assert_eq!(
            found(&library.geolocation, "GPS 43.2965° N, 5.3698° E."),
            vec!["43.2965° N, 5.3698° E"]
        );
        assert!(found(&library.geolocation, "serveur 192.168.1.1, version 2.0").is_empty());
    }

    #[test]
    fn test_free_text_patterns_stay_on_one_line() {
        let library = PatternLibrary::new().unwrap();
        let caps = library
            .medical_data
            .captures("Diagnostic : angine blanche\nSuite")
            .unwrap();
        assert_eq!(&caps[1], "angine blanche");
        let caps = library
            .biometric
            .captures("Empreinte: index droit\tOK")
            .unwrap();
        assert_eq!(&caps[1], "index droit");
    }
}
