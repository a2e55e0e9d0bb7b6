use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub Uuid);

impl InquiryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for InquiryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(InquiryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Обращение клиента: заявка с сайта или от менеджера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(flatten)]
    pub base: BaseAggregate<InquiryId>,

    #[serde(rename = "contactPersonName", default)]
    pub contact_person_name: String,

    #[serde(rename = "companyName", default)]
    pub company_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub country: String,

    /// Статус как его отдаёт API, без канонизации
    #[serde(default)]
    pub status: String,

    /// Дата обращения, ISO "yyyy-mm-dd"
    #[serde(rename = "inquiryDate", default)]
    pub inquiry_date: String,

    #[serde(default)]
    pub source: String,

    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<String>,
}

impl Inquiry {
    pub fn new_for_insert(dto: &InquiryDto) -> Self {
        let mut base = BaseAggregate::new(
            InquiryId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            contact_person_name: dto.contact_person_name.clone(),
            company_name: dto.company_name.clone().unwrap_or_default(),
            email: dto.email.clone(),
            phone: dto.phone.clone().unwrap_or_default(),
            country: dto.country.clone().unwrap_or_default(),
            status: dto.status.clone(),
            inquiry_date: dto.inquiry_date.clone(),
            source: dto.source.clone().unwrap_or_default(),
            assigned_to: dto.assigned_to.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &InquiryDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.contact_person_name = dto.contact_person_name.clone();
        self.company_name = dto.company_name.clone().unwrap_or_default();
        self.email = dto.email.clone();
        self.phone = dto.phone.clone().unwrap_or_default();
        self.country = dto.country.clone().unwrap_or_default();
        self.status = dto.status.clone();
        self.inquiry_date = dto.inquiry_date.clone();
        self.source = dto.source.clone().unwrap_or_default();
        self.assigned_to = dto.assigned_to.clone();
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Inquiry {
    type Id = InquiryId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "inquiries"
    }

    fn element_name() -> &'static str {
        "Обращение"
    }

    fn list_name() -> &'static str {
        "Обращения"
    }
}

impl ListRecord for Inquiry {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.contact_person_name.clone(),
            self.company_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.country.clone(),
            self.status.clone(),
            self.source.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "contact_person_name" => Some(FieldValue::Text(self.contact_person_name.clone())),
            "company_name" => Some(FieldValue::Text(self.company_name.clone())),
            "email" => Some(FieldValue::Text(self.email.clone())),
            "country" => Some(FieldValue::Text(self.country.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "inquiry_date" => Some(FieldValue::Date(self.inquiry_date.clone())),
            "source" => Some(FieldValue::Text(self.source.clone())),
            "assigned_to" => self.assigned_to.clone().map(FieldValue::Text),
            _ => None,
        }
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InquiryDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "contactPersonName", default)]
    pub contact_person_name: String,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "inquiryDate", default)]
    pub inquiry_date: String,
    pub source: Option<String>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<String>,
    pub comment: Option<String>,
}

/// Таблица валидации формы обращения
pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("description", "Тема обращения", ValidationRules::required()),
    FieldRule::new(
        "contact_person_name",
        "Контактное лицо",
        ValidationRules::required(),
    ),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_accessor_exposes_typed_values() {
        let mut dto = InquiryDto::default();
        dto.description = "Запрос цен".into();
        dto.contact_person_name = "John Smith".into();
        dto.email = "john@smith.io".into();
        dto.inquiry_date = "2026-02-11".into();
        let inquiry = Inquiry::new_for_insert(&dto);

        assert_eq!(
            inquiry.field("contact_person_name"),
            Some(FieldValue::Text("John Smith".into()))
        );
        assert_eq!(
            inquiry.field("inquiry_date"),
            Some(FieldValue::Date("2026-02-11".into()))
        );
        assert_eq!(inquiry.field("assigned_to"), None);
        assert_eq!(inquiry.field("nope"), None);
    }

    #[test]
    fn dto_uses_camel_case_wire_names() {
        let json = r#"{
            "description": "Pricing",
            "contactPersonName": "Jane Doe",
            "email": "jane@corp.example",
            "inquiryDate": "2026-01-20",
            "status": "new"
        }"#;
        let dto: InquiryDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.contact_person_name, "Jane Doe");
        assert_eq!(dto.inquiry_date, "2026-01-20");
    }
}
