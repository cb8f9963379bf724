//! IPv4 detection with private/public classification

use super::Detector;
use crate::anonymization::models::{CandidateMatch, DetectionCategory};
use crate::anonymization::settings::Settings;
use anyhow::Result;
use regex::Regex;
use std::net::Ipv4Addr;

/// Three passes over the text: RFC1918 ranges, loopback, then any IPv4.
///
/// The public pass skips every span already claimed by the first two, and
/// never tags an address that parses as private or loopback, so an address
/// is classified once.
pub struct IpDetector {
    private: Regex,
    loopback: Regex,
    any: Regex,
}

impl IpDetector {
    pub fn new(private: Regex, loopback: Regex, any: Regex) -> Self {
        Self {
            private,
            loopback,
            any,
        }
    }

    fn is_non_public(addr: &str) -> bool {
        addr.parse::<Ipv4Addr>()
            .map(|ip| ip.is_private() || ip.is_loopback())
            .unwrap_or(false)
    }
}

impl Detector for IpDetector {
    fn name(&self) -> &'static str {
        "ip"
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.private_ip_enabled() || settings.public_ip_enabled()
    }

    fn detect(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>> {
        let mut claimed: Vec<CandidateMatch> = Vec::new();

        for regex in [&self.private, &self.loopback] {
            for m in regex.find_iter(text) {
                if claimed.iter().any(|c| c.overlaps_span(m.start(), m.end())) {
                    continue;
                }
                claimed.push(CandidateMatch::new(
                    DetectionCategory::IpAddressPrivate,
                    text,
                    m.start(),
                    m.end(),
                    settings.tokens.ip_private.as_str(),
                ));
            }
        }

        let mut found = if settings.private_ip_enabled() {
            claimed.clone()
        } else {
            Vec::new()
        };

        if settings.public_ip_enabled() {
            for m in self.any.find_iter(text) {
                if claimed.iter().any(|c| c.overlaps_span(m.start(), m.end()))
                    || Self::is_non_public(m.as_str())
                {
                    continue;
                }
                found.push(CandidateMatch::new(
                    DetectionCategory::IpAddressPublic,
                    text,
                    m.start(),
                    m.end(),
                    settings.tokens.ip_public.as_str(),
                ));
            }
        }

        Ok(found)
    }
}
