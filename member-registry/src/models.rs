use crate::error::RegistryError;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_optional_length, validate_required};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full member record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<String>,
    pub social_security_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_policy_number: Option<String>,
    pub primary_care_physician: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Registration form payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub social_security_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_policy_number: Option<String>,
    pub primary_care_physician: Option<String>,
}

impl RequestValidation for NewMember {
    fn validate(&self) -> Result<(), RegistryError> {
        validate_required!(self.first_name, 50, "first_name");
        validate_required!(self.last_name, 50, "last_name");
        validate_field!(self.date_of_birth.is_some(), "date_of_birth is required");
        validate_optional_length!(self.gender, 10, "gender");
        validate_optional_length!(self.social_security_number, 11, "social_security_number");
        validate_optional_length!(self.address, 100, "address");
        validate_optional_length!(self.city, 50, "city");
        validate_optional_length!(self.state, 2, "state");
        validate_optional_length!(self.zip_code, 10, "zip_code");
        validate_optional_length!(self.phone_number, 15, "phone_number");
        validate_optional_length!(self.email, 100, "email");
        validate_optional_length!(self.emergency_contact_name, 100, "emergency_contact_name");
        validate_optional_length!(self.emergency_contact_phone, 15, "emergency_contact_phone");
        validate_optional_length!(self.blood_type, 3, "blood_type");
        validate_optional_length!(self.insurance_provider, 50, "insurance_provider");
        validate_optional_length!(self.insurance_policy_number, 50, "insurance_policy_number");
        validate_optional_length!(self.primary_care_physician, 100, "primary_care_physician");
        Ok(())
    }
}

/// Curated subset returned by the member list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MemberSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub social_security_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub primary_care_physician: Option<String>,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            date_of_birth: member.date_of_birth,
            social_security_number: member.social_security_number.clone(),
            address: member.address.clone(),
            city: member.city.clone(),
            zip_code: member.zip_code.clone(),
            phone_number: member.phone_number.clone(),
            email: member.email.clone(),
            emergency_contact_name: member.emergency_contact_name.clone(),
            primary_care_physician: member.primary_care_physician.clone(),
        }
    }
}

/// Identity fields compared by the duplicate check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateCheck {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
}

impl RequestValidation for DuplicateCheck {
    fn validate(&self) -> Result<(), RegistryError> {
        validate_required!(self.first_name, 50, "first_name");
        validate_required!(self.last_name, 50, "last_name");
        validate_field!(self.date_of_birth.is_some(), "date_of_birth is required");
        Ok(())
    }
}

/// Conjunctive member search. `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Case-insensitive substring of first or last name
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub id: Option<i32>,
    pub phone_number: Option<String>,
}

impl SearchFilters {
    /// Drop blank text filters
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            name: non_blank(self.name),
            date_of_birth: self.date_of_birth,
            id: self.id,
            phone_number: non_blank(self.phone_number),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_of_birth.is_none()
            && self.id.is_none()
            && self.phone_number.is_none()
    }

    /// Same predicate the SQL search applies
    pub fn matches(&self, member: &Member) -> bool {
        if let Some(name) = &self.name {
            let needle = name.to_lowercase();
            if !member.first_name.to_lowercase().contains(&needle)
                && !member.last_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.date_of_birth.is_some_and(|dob| dob != member.date_of_birth) {
            return false;
        }
        if self.id.is_some_and(|id| id != member.id) {
            return false;
        }
        if let Some(phone) = &self.phone_number {
            if member.phone_number.as_deref() != Some(phone.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Case-worker scoped client row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub case_worker_id: String,
}
