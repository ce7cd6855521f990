use serde::{Deserialize, Serialize};

use crate::models::booking::{NewBooking, PreferredContact, ServiceType};

/// Public booking form as submitted. Enumerated fields arrive as text so an
/// unknown service or contact preference yields a field-level issue; a value
/// of the wrong JSON type is rejected by `JsonBody` as `VALIDATION_ERROR`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub service_type: String,
    pub preferred_contact: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub reason: String,
}

/// Checks required-field presence and the enumerated fields, returning every
/// issue at once so the form can be corrected in one pass.
pub fn validate_booking(form: BookingForm) -> Result<NewBooking, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let mut required = |field: &'static str, value: &str| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            issues.push(FieldIssue {
                field,
                reason: "is required".to_string(),
            });
        }
        trimmed.to_string()
    };
    let name = required("name", &form.name);
    let email = required("email", &form.email);
    let mobile = required("mobile", &form.mobile);
    let address = required("address", &form.address);
    let service_label = required("service_type", &form.service_type);

    if !email.is_empty() && !email.contains('@') {
        issues.push(FieldIssue {
            field: "email",
            reason: "must be an email address".to_string(),
        });
    }

    let service_type = ServiceType::from_label(&service_label);
    if service_type.is_none() && !service_label.is_empty() {
        issues.push(FieldIssue {
            field: "service_type",
            reason: format!("unknown service '{service_label}'"),
        });
    }

    let preferred_contact = match form.preferred_contact.as_deref().map(str::trim) {
        None | Some("") => Some(PreferredContact::default()),
        Some(value) => {
            let parsed = PreferredContact::parse(value);
            if parsed.is_none() {
                issues.push(FieldIssue {
                    field: "preferred_contact",
                    reason: "must be one of email, phone, either".to_string(),
                });
            }
            parsed
        }
    };

    let notes = form
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    match (service_type, preferred_contact) {
        (Some(service_type), Some(preferred_contact)) if issues.is_empty() => Ok(NewBooking {
            name,
            email,
            mobile,
            address,
            service_type,
            preferred_contact,
            notes,
        }),
        _ => Err(issues),
    }
}

/// Joins issues into a single human-readable line.
pub fn describe_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{} {}", i.field, i.reason))
        .collect::<Vec<_>>()
        .join("; ")
}
