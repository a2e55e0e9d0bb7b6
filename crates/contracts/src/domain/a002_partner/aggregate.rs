use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerId(pub Uuid);

impl PartnerId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for PartnerId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PartnerId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Партнёр (агент или реселлер). `description` — название партнёра.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(flatten)]
    pub base: BaseAggregate<PartnerId>,

    #[serde(rename = "contactPerson", default)]
    pub contact_person: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub country: String,

    /// Статус KYC-проверки, сырое значение API
    #[serde(rename = "kycStatus", default)]
    pub kyc_status: String,

    #[serde(rename = "partnerType", default)]
    pub partner_type: String,

    /// Дата регистрации, ISO "yyyy-mm-dd"
    #[serde(rename = "registeredAt", default)]
    pub registered_at: String,
}

impl Partner {
    pub fn new_for_insert(dto: &PartnerDto) -> Self {
        let mut base = BaseAggregate::new(
            PartnerId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            contact_person: dto.contact_person.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone().unwrap_or_default(),
            country: dto.country.clone().unwrap_or_default(),
            kyc_status: dto.kyc_status.clone(),
            partner_type: dto.partner_type.clone().unwrap_or_default(),
            registered_at: dto.registered_at.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &PartnerDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.contact_person = dto.contact_person.clone();
        self.email = dto.email.clone();
        self.phone = dto.phone.clone().unwrap_or_default();
        self.country = dto.country.clone().unwrap_or_default();
        self.kyc_status = dto.kyc_status.clone();
        self.partner_type = dto.partner_type.clone().unwrap_or_default();
        self.registered_at = dto.registered_at.clone();
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Partner {
    type Id = PartnerId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "partners"
    }

    fn element_name() -> &'static str {
        "Партнёр"
    }

    fn list_name() -> &'static str {
        "Партнёры"
    }
}

impl ListRecord for Partner {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.contact_person.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.country.clone(),
            self.kyc_status.clone(),
            self.partner_type.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "contact_person" => Some(FieldValue::Text(self.contact_person.clone())),
            "email" => Some(FieldValue::Text(self.email.clone())),
            "country" => Some(FieldValue::Text(self.country.clone())),
            "kyc_status" => Some(FieldValue::Text(self.kyc_status.clone())),
            "partner_type" => Some(FieldValue::Text(self.partner_type.clone())),
            "registered_at" => Some(FieldValue::Date(self.registered_at.clone())),
            _ => None,
        }
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartnerDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "contactPerson", default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "kycStatus", default)]
    pub kyc_status: String,
    #[serde(rename = "partnerType")]
    pub partner_type: Option<String>,
    #[serde(rename = "registeredAt", default)]
    pub registered_at: String,
    pub comment: Option<String>,
}

/// Таблица валидации формы партнёра
pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("description", "Название", ValidationRules::required()),
    FieldRule::new("contact_person", "Контактное лицо", ValidationRules::required()),
    FieldRule::new(
        "email",
        "Email",
        ValidationRules {
            required: true,
            min_length: Some(5),
            ..ValidationRules::none()
        },
    ),
];
