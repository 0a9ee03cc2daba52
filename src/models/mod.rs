use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};

/// OpenWork account credentials, used once to establish a session
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Raw result of a company-page fetch; either field may be missing
#[derive(Debug, Clone, Default)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub introduction: Option<String>,
}

impl CompanyProfile {
    /// A profile without a name means the id resolved to nothing.
    pub fn into_company(self, company_id: &str) -> Result<CompanyInfo> {
        let name = self
            .name
            .ok_or_else(|| ScoutError::InvalidIdentifier(company_id.to_string()))?;
        Ok(CompanyInfo {
            name,
            introduction: self.introduction,
        })
    }
}

/// Validated company metadata, immutable once fetched
#[derive(Debug, Clone)]
pub struct CompanyInfo {
    pub name: String,
    pub introduction: Option<String>,
}

/// A single scraped review, persisted verbatim to the reviews JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// ISO 8601 date as served by the site, if the review carried one
    pub date: Option<String>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_with_name_converts() {
        let profile = CompanyProfile {
            name: Some("Acme Corp".to_string()),
            introduction: None,
        };
        let company = profile.into_company("12345").unwrap();
        assert_eq!(company.name, "Acme Corp");
        assert!(company.introduction.is_none());
    }

    #[test]
    fn nameless_profile_is_an_invalid_id() {
        let profile = CompanyProfile {
            name: None,
            introduction: Some("orphaned intro".to_string()),
        };
        let err = profile.into_company("12345").unwrap_err();
        assert!(matches!(err, ScoutError::InvalidIdentifier(id) if id == "12345"));
    }
}
