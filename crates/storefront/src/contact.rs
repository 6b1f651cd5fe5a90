//! Contact form submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitashop_core::{DomainError, DomainResult, InquiryId};

pub const CONTACT_INCOMPLETE_MESSAGE: &str = "필수 항목을 모두 입력해주세요.";
pub const CONTACT_SENT_MESSAGE: &str =
    "문의가 성공적으로 전송되었습니다. 빠른 시일 내에 연락드리겠습니다.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Optional.
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Name, email and message must be non-blank.
    pub fn validate(&self) -> DomainResult<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn submit(self, at: DateTime<Utc>) -> DomainResult<Inquiry> {
        self.validate()?;
        let inquiry = Inquiry {
            id: InquiryId::new(),
            form: self,
            submitted_at: at,
        };
        tracing::info!(
            inquiry_id = %inquiry.id,
            email = %inquiry.form.email,
            has_phone = !inquiry.form.phone.trim().is_empty(),
            "contact inquiry received"
        );
        Ok(inquiry)
    }
}

/// An accepted contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub form: ContactForm,
    pub submitted_at: DateTime<Utc>,
}
