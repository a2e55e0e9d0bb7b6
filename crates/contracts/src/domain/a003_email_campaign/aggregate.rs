use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailCampaignId(pub Uuid);

impl EmailCampaignId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for EmailCampaignId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EmailCampaignId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Email-рассылка. `description` — название кампании.
///
/// Статус приходит от API как есть: встречаются "" и "Inactive", а у
/// старых записей поле отсутствует. Значение не канонизируем —
/// отображаем и фильтруем сырую строку.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailCampaign {
    #[serde(flatten)]
    pub base: BaseAggregate<EmailCampaignId>,

    #[serde(default)]
    pub subject: String,

    /// Целевая аудитория (сегмент)
    #[serde(default)]
    pub audience: String,

    #[serde(default)]
    pub status: String,

    /// Дата планируемой отправки, ISO
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: Option<String>,

    #[serde(rename = "sentCount", default)]
    pub sent_count: i64,
}

impl EmailCampaign {
    pub fn new_for_insert(dto: &EmailCampaignDto) -> Self {
        let mut base = BaseAggregate::new(
            EmailCampaignId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            subject: dto.subject.clone(),
            audience: dto.audience.clone().unwrap_or_default(),
            status: dto.status.clone(),
            scheduled_at: dto.scheduled_at.clone(),
            sent_count: dto.sent_count.unwrap_or(0),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &EmailCampaignDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.subject = dto.subject.clone();
        self.audience = dto.audience.clone().unwrap_or_default();
        self.status = dto.status.clone();
        self.scheduled_at = dto.scheduled_at.clone();
        if let Some(count) = dto.sent_count {
            self.sent_count = count;
        }
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for EmailCampaign {
    type Id = EmailCampaignId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "email_campaigns"
    }

    fn element_name() -> &'static str {
        "Рассылка"
    }

    fn list_name() -> &'static str {
        "Email-рассылки"
    }
}

impl ListRecord for EmailCampaign {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.subject.clone(),
            self.audience.clone(),
            self.status.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "subject" => Some(FieldValue::Text(self.subject.clone())),
            "audience" => Some(FieldValue::Text(self.audience.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "scheduled_at" => self.scheduled_at.clone().map(FieldValue::Date),
            "sent_count" => Some(FieldValue::Number(self.sent_count as f64)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmailCampaignDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub subject: String,
    pub audience: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: Option<String>,
    #[serde(rename = "sentCount")]
    pub sent_count: Option<i64>,
    pub comment: Option<String>,
}

/// Таблица валидации формы рассылки
pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("description", "Название", ValidationRules::required()),
    FieldRule::new(
        "subject",
        "Тема письма",
        ValidationRules::required().with_max_length(200),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_status_becomes_empty_string() {
        let json = r#"{"description": "Q1 digest", "subject": "News"}"#;
        let dto: EmailCampaignDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.status, "");
    }
}
