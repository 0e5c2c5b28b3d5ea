//! Dialog form state
//!
//! Each form mirrors the fields of one dialog. `populate` fills it from
//! server data (formatting masked fields on the way in) and `validate`
//! checks it and produces the request body for the save call.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::inline::InlineEditor;
use crate::models::{
    BetaSignup, EmailReceiptRequest, EmailSettings, EmailSettingsUpdate, Feedback, Logo,
    Organization, TransactionItem,
};
use crate::types::LogoPosition;
use crate::validation::{
    validate_ein, validate_email, validate_phone, validate_url, validate_zip, ImageDimensions,
    LogoFile,
};
use receiptdesk_utils::{format_ein, format_phone_number, format_zip, mask_input};

pub const DEFAULT_RECEIPT_SUBJECT: &str = "Your Donation Receipt";

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ==================== Organization ====================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationForm {
    pub name: String,
    pub ein: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub url: String,
}

impl OrganizationForm {
    pub fn populate(&mut self, org: &Organization) {
        self.name = org.name.clone();
        self.ein = format_ein(&org.ein);
        self.address = org.address.clone();
        self.city = org.city.clone();
        self.state = org.state.clone();
        self.zip = format_zip(&org.zip);
        self.contact = org.contact.clone();
        self.phone = format_phone_number(&org.phone);
        self.email = org.email.clone();
        self.url = org.url.clone();
    }

    /// Keystroke into the EIN field
    pub fn input_ein(&mut self, value: &str) {
        self.ein = mask_input(value, format_ein).unwrap_or_else(|| value.to_string());
    }

    /// Keystroke into the phone field
    pub fn input_phone(&mut self, value: &str) {
        self.phone = mask_input(value, format_phone_number).unwrap_or_else(|| value.to_string());
    }

    /// Keystroke into the ZIP field
    pub fn input_zip(&mut self, value: &str) {
        self.zip = mask_input(value, format_zip).unwrap_or_else(|| value.to_string());
    }

    pub fn validate(&self, id: Option<i64>) -> CoreResult<Organization> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Organization name is required."));
        }
        if !self.ein.trim().is_empty() && !validate_ein(&self.ein) {
            return Err(CoreError::validation("EIN must be in the format XX-XXXXXXX."));
        }
        if !self.zip.trim().is_empty() && !validate_zip(&self.zip) {
            return Err(CoreError::validation("ZIP code must be 5 or 9 digits."));
        }
        if !self.phone.trim().is_empty() && !validate_phone(&self.phone) {
            return Err(CoreError::validation("Please enter a valid phone number."));
        }
        if !self.email.trim().is_empty() && !validate_email(&self.email) {
            return Err(CoreError::validation("Please enter a valid email address."));
        }
        if !self.url.trim().is_empty() && !validate_url(&self.url) {
            return Err(CoreError::validation("Website must start with http:// or https://."));
        }

        Ok(Organization {
            id,
            name: self.name.trim().to_string(),
            ein: self.ein.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip: self.zip.trim().to_string(),
            contact: self.contact.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            url: self.url.trim().to_string(),
        })
    }
}

// ==================== Email settings ====================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailSettingsForm {
    pub use_custom: bool,
    pub smtp_host: String,
    pub smtp_port: String,
    pub smtp_user: String,
    /// Never filled from the server
    pub smtp_password: String,
    pub smtp_secure: bool,
    pub from_email: String,
    pub from_name: String,
}

impl EmailSettingsForm {
    pub fn populate(&mut self, settings: &EmailSettings) {
        self.use_custom = settings.use_custom;
        self.smtp_host = settings.smtp_host.clone();
        self.smtp_port = settings.smtp_port.map(|p| p.to_string()).unwrap_or_default();
        self.smtp_user = settings.smtp_user.clone();
        self.smtp_password.clear();
        self.smtp_secure = settings.smtp_secure;
        self.from_email = settings.from_email.clone();
        self.from_name = settings.from_name.clone();
    }

    pub fn validate(&self) -> CoreResult<EmailSettingsUpdate> {
        let smtp_port = if self.smtp_port.trim().is_empty() {
            None
        } else {
            match self.smtp_port.trim().parse::<u16>() {
                Ok(port) if port > 0 => Some(port),
                _ => return Err(CoreError::validation("SMTP port must be between 1 and 65535.")),
            }
        };

        if self.use_custom {
            if self.smtp_host.trim().is_empty() {
                return Err(CoreError::validation("SMTP host is required."));
            }
            if smtp_port.is_none() {
                return Err(CoreError::validation("SMTP port is required."));
            }
            if self.smtp_user.trim().is_empty() {
                return Err(CoreError::validation("SMTP username is required."));
            }
            if !validate_email(&self.from_email) {
                return Err(CoreError::validation("Please enter a valid from address."));
            }
        }

        Ok(EmailSettingsUpdate {
            settings: EmailSettings {
                use_custom: self.use_custom,
                smtp_host: self.smtp_host.trim().to_string(),
                smtp_port,
                smtp_user: self.smtp_user.trim().to_string(),
                smtp_secure: self.smtp_secure,
                from_email: self.from_email.trim().to_string(),
                from_name: self.from_name.trim().to_string(),
            },
            smtp_password: optional(&self.smtp_password),
        })
    }
}

// ==================== Email send ====================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailSendForm {
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl EmailSendForm {
    pub fn prefill(&mut self, donor_email: &str) {
        self.email = donor_email.trim().to_string();
        self.subject = DEFAULT_RECEIPT_SUBJECT.to_string();
        self.message.clear();
    }

    pub fn validate(&self, transaction_id: &str) -> CoreResult<EmailReceiptRequest> {
        if !validate_email(&self.email) {
            return Err(CoreError::validation("Please enter a valid email address."));
        }
        if self.subject.trim().is_empty() {
            return Err(CoreError::validation("Subject is required."));
        }
        Ok(EmailReceiptRequest {
            transaction_id: transaction_id.to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

// ==================== Feedback and beta signup ====================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub category: String,
    pub message: String,
    pub email: String,
    pub rating: Option<u8>,
}

impl FeedbackForm {
    pub fn validate(&self) -> CoreResult<Feedback> {
        if self.message.trim().is_empty() {
            return Err(CoreError::validation("Please enter your feedback."));
        }
        if !self.email.trim().is_empty() && !validate_email(&self.email) {
            return Err(CoreError::validation("Please enter a valid email address."));
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(CoreError::validation("Rating must be between 1 and 5."));
            }
        }
        let category = optional(&self.category).unwrap_or_else(|| "general".to_string());
        Ok(Feedback {
            category,
            message: self.message.trim().to_string(),
            email: optional(&self.email),
            rating: self.rating,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetaSignupForm {
    pub name: String,
    pub email: String,
    pub organization: String,
}

impl BetaSignupForm {
    pub fn validate(&self) -> CoreResult<BetaSignup> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Name is required."));
        }
        if !validate_email(&self.email) {
            return Err(CoreError::validation("Please enter a valid email address."));
        }
        Ok(BetaSignup {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            organization: optional(&self.organization),
        })
    }
}

// ==================== Logo ====================

/// Logo dialog: the stored logo plus the file picked for upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogoForm {
    pub current: Option<Logo>,
    pub selected: Option<LogoFile>,
    pub dimensions: Option<ImageDimensions>,
    pub position: LogoPosition,
    /// Preview-time notice about an oversized image
    pub warning: Option<String>,
}

// ==================== Receipt ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiptStatus {
    #[default]
    Unknown,
    NotGenerated,
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptView {
    pub transaction_id: Option<String>,
    pub status: ReceiptStatus,
}

// ==================== Items ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Description,
    Quantity,
    Amount,
}

impl std::str::FromStr for ItemField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "description" => Ok(ItemField::Description),
            "quantity" | "qty" => Ok(ItemField::Quantity),
            "amount" => Ok(ItemField::Amount),
            _ => Err(format!("Invalid item field: {}", s)),
        }
    }
}

/// Items dialog: a transaction's line items with in-place editing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsForm {
    pub transaction_id: Option<String>,
    pub items: Vec<TransactionItem>,
    pub editor: InlineEditor<(String, ItemField)>,
}

impl ItemsForm {
    pub fn field_text(&self, item_id: &str, field: ItemField) -> Option<String> {
        let item = self.items.iter().find(|i| i.id == item_id)?;
        Some(match field {
            ItemField::Description => item.description.clone(),
            ItemField::Quantity => item.quantity.to_string(),
            ItemField::Amount => item.amount.to_string(),
        })
    }

    /// Start editing one field of one item
    pub fn begin_edit(&mut self, item_id: &str, field: ItemField) -> bool {
        match self.field_text(item_id, field) {
            Some(text) => {
                self.editor.begin((item_id.to_string(), field), text);
                true
            }
            None => false,
        }
    }

    /// Apply a committed edit and return the updated item to save
    pub fn apply_edit(&mut self, item_id: &str, field: ItemField, value: &str) -> CoreResult<TransactionItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::NotFound {
                resource: format!("item {}", item_id),
            })?;

        let parse = |label: &str| {
            Decimal::from_str(value.trim().trim_start_matches('$').replace(',', "").as_str())
                .map_err(|_| CoreError::validation(format!("{} must be a number.", label)))
        };

        match field {
            ItemField::Description => {
                if value.trim().is_empty() {
                    return Err(CoreError::validation("Description is required."));
                }
                item.description = value.trim().to_string();
            }
            ItemField::Quantity => {
                let quantity = parse("Quantity")?;
                if quantity <= Decimal::ZERO {
                    return Err(CoreError::validation("Quantity must be greater than zero."));
                }
                item.quantity = quantity;
            }
            ItemField::Amount => {
                let amount = parse("Amount")?;
                if amount.is_sign_negative() {
                    return Err(CoreError::validation("Amount cannot be negative."));
                }
                item.amount = amount;
            }
        }
        Ok(item.clone())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalForm;

    #[test]
    fn test_organization_populate_formats_fields() {
        let mut form = OrganizationForm::default();
        form.populate(&Organization {
            name: "Food Bank".to_string(),
            ein: "123456789".to_string(),
            zip: "902101234".to_string(),
            phone: "5551234567".to_string(),
            ..Default::default()
        });
        assert_eq!(form.ein, "12-3456789");
        assert_eq!(form.zip, "90210-1234");
        assert_eq!(form.phone, "(555) 123-4567");
    }

    #[test]
    fn test_organization_validation() {
        let mut form = OrganizationForm::default();
        assert!(form.validate(None).is_err());

        form.name = " Food Bank ".to_string();
        form.input_ein("12345");
        assert_eq!(form.ein, "12-345");
        assert!(form.validate(None).unwrap_err().to_string().contains("EIN"));

        form.input_ein("12-3456789");
        form.input_phone("555123");
        assert!(form.validate(None).unwrap_err().to_string().contains("phone"));

        form.input_phone("5551234567");
        let org = form.validate(Some(3)).unwrap();
        assert_eq!(org.id, Some(3));
        assert_eq!(org.name, "Food Bank");
    }

    #[test]
    fn test_email_settings_password_is_write_only() {
        let mut form = EmailSettingsForm {
            smtp_password: "typed".to_string(),
            ..Default::default()
        };
        form.populate(&EmailSettings {
            use_custom: true,
            smtp_host: "smtp.example.org".to_string(),
            smtp_port: Some(587),
            smtp_user: "mailer".to_string(),
            from_email: "receipts@example.org".to_string(),
            ..Default::default()
        });
        assert!(form.smtp_password.is_empty());
        assert_eq!(form.smtp_port, "587");

        let update = form.validate().unwrap();
        assert_eq!(update.smtp_password, None);

        form.smtp_password = "secret".to_string();
        assert_eq!(form.validate().unwrap().smtp_password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_custom_email_settings_require_fields() {
        let form = EmailSettingsForm {
            use_custom: true,
            smtp_host: "smtp.example.org".to_string(),
            smtp_port: "70000".to_string(),
            ..Default::default()
        };
        assert!(form.validate().unwrap_err().to_string().contains("port"));

        let form = EmailSettingsForm::default();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_email_send_form() {
        let mut form = EmailSendForm::default();
        form.prefill("donor@example.org");
        assert_eq!(form.subject, DEFAULT_RECEIPT_SUBJECT);
        let request = form.validate("42").unwrap();
        assert_eq!(request.transaction_id, "42");

        form.email = "nope".to_string();
        assert!(form.validate("42").is_err());

        form.reset();
        assert!(form.subject.is_empty());
    }

    #[test]
    fn test_feedback_and_beta() {
        let form = FeedbackForm {
            message: "Love it".to_string(),
            rating: Some(5),
            ..Default::default()
        };
        let feedback = form.validate().unwrap();
        assert_eq!(feedback.category, "general");
        assert_eq!(feedback.email, None);

        let form = FeedbackForm {
            message: "x".to_string(),
            rating: Some(9),
            ..Default::default()
        };
        assert!(form.validate().is_err());

        let beta = BetaSignupForm {
            name: "Pat".to_string(),
            email: "pat@example.org".to_string(),
            organization: String::new(),
        };
        assert_eq!(beta.validate().unwrap().organization, None);
    }

    #[test]
    fn test_item_inline_edit() {
        let mut form = ItemsForm {
            transaction_id: Some("7".to_string()),
            items: vec![TransactionItem {
                id: "a".to_string(),
                description: "Books".to_string(),
                quantity: Decimal::ONE,
                amount: Decimal::from(20),
            }],
            ..Default::default()
        };

        assert!(form.begin_edit("a", ItemField::Amount));
        form.editor.update("$1,250.50");
        let ((item_id, field), value) = form.editor.commit().unwrap();
        let item = form.apply_edit(&item_id, field, &value).unwrap();
        assert_eq!(item.amount, Decimal::from_str("1250.50").unwrap());

        assert!(form.apply_edit("a", ItemField::Quantity, "0").is_err());
        assert!(form.apply_edit("zzz", ItemField::Description, "x").is_err());
        assert!(!form.begin_edit("zzz", ItemField::Amount));
    }
}
